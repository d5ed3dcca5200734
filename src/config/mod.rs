//! Configuration module

mod site;

pub use site::NavItem;
pub use site::Route;
pub use site::SiteConfig;
