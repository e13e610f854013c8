pub mod find_by_email;
