pub struct Link;

impl Link {
    pub const TEXT_OPEN: u8 = b'[';
    pub const TEXT_CLOSE: u8 = b']';
    pub const TEXT_CLOSE_URL_OPEN: &'static [u8; 2] = b"](";
    pub const URL_CLOSE: u8 = b')';
}
