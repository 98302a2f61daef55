pub mod bar;
pub mod exchange;
pub mod interval;
pub mod raw;
pub mod request;
