pub mod image_delete;
pub mod image_list;
pub mod image_upload;
pub mod root;
