pub mod config;
pub mod init;
pub mod inspect;
pub mod meta;
pub mod playlist;
pub mod scan;
pub mod scope;
pub mod session;
