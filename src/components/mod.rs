pub mod config;

pub mod shell;

pub mod storage;

pub mod student;
