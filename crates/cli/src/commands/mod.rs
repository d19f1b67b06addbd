pub mod alpha;
pub mod critical;
pub mod grid;
pub mod init;
pub mod run;
pub mod sample;
pub mod scan;
pub mod step;
