pub mod analysis;
pub mod assets;
pub mod branding;
pub mod content;
pub mod sites;
