// joydev ioctl definitions
// From linux/joystick.h:
// #define JSIOCGVERSION     _IOR('j', 0x01, __u32)
// #define JSIOCGAXES        _IOR('j', 0x11, __u8)
// #define JSIOCGBUTTONS     _IOR('j', 0x12, __u8)
// #define JSIOCGNAME(len)   _IOC(_IOC_READ, 'j', 0x13, len)
// #define JSIOCGAXMAP       _IOR('j', 0x32, __u8[ABS_CNT])
// #define JSIOCGBTNMAP      _IOR('j', 0x34, __u16[KEY_MAX - BTN_MISC + 1])

use crate::codes::{ABS_CNT, BTN_MISC, KEY_MAX};
use crate::error::DeviceError;
use std::os::unix::io::RawFd;

const JOYDEV_MAGIC: u8 = b'j';

/// Length of the button map returned by `JSIOCGBTNMAP`
pub const BTNMAP_LEN: usize = (KEY_MAX - BTN_MISC + 1) as usize;

/// Buffer size used for `JSIOCGNAME`
pub const NAME_LEN: usize = 128;

fn ior(nr: u32, len: usize) -> libc::c_ulong {
    // _IOC(_IOC_READ, 'j', nr, len)
    // Direction: 2 bits at 30-31, Size: 14 bits at 16-29, Type: 8 bits at 8-15, Nr: 8 bits at 0-7
    let dir: u32 = 2; // _IOC_READ
    let size = (len as u32) & 0x3FFF;
    let typ = JOYDEV_MAGIC as u32;
    ((dir << 30) | (size << 16) | (typ << 8) | nr) as libc::c_ulong
}

fn jsiocgversion() -> libc::c_ulong {
    ior(0x01, std::mem::size_of::<u32>())
}

fn jsiocgaxes() -> libc::c_ulong {
    ior(0x11, std::mem::size_of::<u8>())
}

fn jsiocgbuttons() -> libc::c_ulong {
    ior(0x12, std::mem::size_of::<u8>())
}

fn jsiocgname(len: usize) -> libc::c_ulong {
    ior(0x13, len)
}

fn jsiocgaxmap() -> libc::c_ulong {
    ior(0x32, ABS_CNT)
}

fn jsiocgbtnmap() -> libc::c_ulong {
    ior(0x34, BTNMAP_LEN * std::mem::size_of::<u16>())
}

fn check(ret: libc::c_int, request: &'static str) -> Result<libc::c_int, DeviceError> {
    if ret < 0 {
        Err(DeviceError::Query {
            request,
            source: std::io::Error::last_os_error(),
        })
    } else {
        Ok(ret)
    }
}

pub fn version(fd: RawFd) -> Result<u32, DeviceError> {
    let mut version: u32 = 0;
    let ret = unsafe { libc::ioctl(fd, jsiocgversion() as _, &mut version as *mut u32) };
    check(ret, "JSIOCGVERSION")?;
    Ok(version)
}

pub fn axes(fd: RawFd) -> Result<u8, DeviceError> {
    let mut axes: u8 = 0;
    let ret = unsafe { libc::ioctl(fd, jsiocgaxes() as _, &mut axes as *mut u8) };
    check(ret, "JSIOCGAXES")?;
    Ok(axes)
}

pub fn buttons(fd: RawFd) -> Result<u8, DeviceError> {
    let mut buttons: u8 = 0;
    let ret = unsafe { libc::ioctl(fd, jsiocgbuttons() as _, &mut buttons as *mut u8) };
    check(ret, "JSIOCGBUTTONS")?;
    Ok(buttons)
}

pub fn name(fd: RawFd) -> Result<String, DeviceError> {
    let mut buf = [0u8; NAME_LEN];
    let ret = unsafe { libc::ioctl(fd, jsiocgname(NAME_LEN) as _, buf.as_mut_ptr()) };
    let len = check(ret, "JSIOCGNAME")? as usize;
    // The returned length counts the terminating NUL when it fits
    let raw = &buf[..len.min(NAME_LEN)];
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    Ok(String::from_utf8_lossy(&raw[..end]).into_owned())
}

pub fn axis_map(fd: RawFd) -> Result<[u8; ABS_CNT], DeviceError> {
    let mut map = [0u8; ABS_CNT];
    let ret = unsafe { libc::ioctl(fd, jsiocgaxmap() as _, map.as_mut_ptr()) };
    check(ret, "JSIOCGAXMAP")?;
    Ok(map)
}

pub fn button_map(fd: RawFd) -> Result<Vec<u16>, DeviceError> {
    let mut map = vec![0u16; BTNMAP_LEN];
    let ret = unsafe { libc::ioctl(fd, jsiocgbtnmap() as _, map.as_mut_ptr()) };
    check(ret, "JSIOCGBTNMAP")?;
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference values from the x86-64/arm64 kernel headers
    #[test]
    fn request_codes_match_kernel_headers() {
        assert_eq!(jsiocgversion(), 0x8004_6a01);
        assert_eq!(jsiocgaxes(), 0x8001_6a11);
        assert_eq!(jsiocgbuttons(), 0x8001_6a12);
        assert_eq!(jsiocgname(128), 0x8080_6a13);
        assert_eq!(jsiocgaxmap(), 0x8040_6a32);
        assert_eq!(jsiocgbtnmap(), 0x8400_6a34);
    }
}
