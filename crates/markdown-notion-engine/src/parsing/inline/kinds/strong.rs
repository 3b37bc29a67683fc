/// Bold text `**text**`.
///
/// The inner text may not contain `*`, so a lone `*` never starts or ends bold.
pub struct Strong;

impl Strong {
    pub const DELIM: &'static [u8; 2] = b"**";
    pub const STAR: u8 = b'*';
}
