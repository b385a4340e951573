pub mod directory;
pub mod site;
