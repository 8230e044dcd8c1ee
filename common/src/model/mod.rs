pub mod analysis;
pub mod asset;
pub mod branding;
pub mod business;
pub mod content;
pub mod site;
