pub mod mail;
pub mod push;
pub mod storage;

pub use mail::MailClient;
pub use push::PushClient;
pub use storage::StorageClient;
