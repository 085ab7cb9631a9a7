//! Device numbers in the glibc `makedev` encoding.

/// A device number split into major and minor parts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Device(u64);

impl Device {
    pub fn new(number: u64) -> Self {
        Device(number)
    }

    pub fn from_major_minor(major: u32, minor: u32) -> Self {
        let (major, minor) = (major as u64, minor as u64);
        Device(
            ((major & 0x0000_0fff) << 8)
                | ((major & 0xffff_f000) << 32)
                | (minor & 0x0000_00ff)
                | ((minor & 0xffff_ff00) << 12),
        )
    }

    pub fn number(&self) -> u64 {
        self.0
    }

    pub fn major(&self) -> u32 {
        (((self.0 >> 8) & 0x0000_0fff) | ((self.0 >> 32) & 0xffff_f000)) as u32
    }

    pub fn minor(&self) -> u32 {
        ((self.0 & 0x0000_00ff) | ((self.0 >> 12) & 0xffff_ff00)) as u32
    }
}

impl From<u64> for Device {
    fn from(number: u64) -> Self {
        Device(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers() {
        // /dev/sda1 is 8:1
        let dev = Device::from_major_minor(8, 1);
        assert_eq!(dev.number(), 0x801);
        assert_eq!((dev.major(), dev.minor()), (8, 1));
    }

    #[test]
    fn test_wide_numbers() {
        let dev = Device::from_major_minor(0x12345, 0x6789a);
        assert_eq!(dev.number(), 0x0001_2000_6783_459a);
        assert_eq!(dev.major(), 0x12345);
        assert_eq!(dev.minor(), 0x6789a);
    }

    #[test]
    fn test_known_encoding() {
        // makedev(259, 65536) on glibc
        let dev = Device::new(0x1001_0300);
        assert_eq!(dev.major(), 259);
        assert_eq!(dev.minor(), 65536);
        assert_eq!(Device::from_major_minor(259, 65536), dev);
    }
}
