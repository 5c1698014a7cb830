// Presentation shell: turns a finished run into terminal output.

pub mod render;
