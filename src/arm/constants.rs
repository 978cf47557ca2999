// N/S cycle classification supplied by the core with every bus access
pub mod access_code {
    pub const NONSEQUENTIAL: u8 = 0;
    pub const SEQUENTIAL: u8 = 1;
}
