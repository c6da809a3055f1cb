pub mod banner;
pub mod colors;
pub mod format;
pub mod logging;
pub mod print;
pub mod spinner;

/// Output options taken from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    pub quiet: u8,
    pub no_banner: bool,
}
