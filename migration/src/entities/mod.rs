pub mod activity;
pub mod link;
pub mod stored_file;

pub use activity::Entity as ActivityEntity;
pub use link::Entity as LinkEntity;
pub use stored_file::Entity as StoredFileEntity;
