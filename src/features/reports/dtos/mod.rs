mod report_dto;

pub use report_dto::{
    is_image_type_allowed, sanitize_file_name, CreateFoundReportDto, CreateLostReportDto,
    FoundItemStatusDto, FoundReportFormDto, FoundReportSubmittedDto, ImageUpload,
    LostReportSubmittedDto, ALLOWED_IMAGE_TYPES, MAX_IMAGE_SIZE,
};
