pub mod create_file;
pub mod delete_file;
pub mod list_files;
pub mod purge_files;
pub mod record_download;
