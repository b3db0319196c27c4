//! Configuration module

mod site;

pub use site::AuthorConfig;
pub use site::CommentsConfig;
pub use site::FeedConfig;
pub use site::SiteConfig;
pub use site::SocialConfig;
