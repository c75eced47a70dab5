mod common;

mod certification;
