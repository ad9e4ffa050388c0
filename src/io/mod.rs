pub mod config_io;
pub mod editor;
pub mod paths;
pub mod storage;
