//! 终端尺寸探测与清屏
//!
//! 每次快照前重新探测尺寸，终端缩放即时生效。探测失败时退回
//! 80x24，渲染逻辑自身保证窄终端下限（见`monitor::render`）。

use std::io::{self, Write};

/// 探测失败时的保守默认尺寸
pub const DEFAULT_SIZE: (u16, u16) = (80, 24);

/// 当前终端的（列数，行数）
pub fn size() -> (u16, u16) {
    platform_size().unwrap_or(DEFAULT_SIZE)
}

/// 清屏
///
/// Unix写ANSI序列；Windows沿用平台命令。
#[cfg(unix)]
pub fn clear(out: &mut impl Write) -> io::Result<()> {
    out.write_all(b"\x1b[2J\x1b[1;1H")
}

#[cfg(windows)]
pub fn clear(_out: &mut impl Write) -> io::Result<()> {
    let _ = std::process::Command::new("cmd").args(["/C", "cls"]).status()?;
    Ok(())
}

#[cfg(not(any(unix, windows)))]
pub fn clear(_out: &mut impl Write) -> io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn platform_size() -> Option<(u16, u16)> {
    use std::os::raw::{c_int, c_ulong};

    #[repr(C)]
    #[derive(Default)]
    struct Winsize {
        ws_row: u16,
        ws_col: u16,
        ws_xpixel: u16,
        ws_ypixel: u16,
    }

    #[cfg(target_os = "linux")]
    const TIOCGWINSZ: c_ulong = 0x5413;
    #[cfg(not(target_os = "linux"))]
    const TIOCGWINSZ: c_ulong = 0x4008_7468;

    extern "C" {
        fn ioctl(fd: c_int, request: c_ulong, ...) -> c_int;
    }

    const STDOUT_FILENO: c_int = 1;

    let mut ws = Winsize::default();
    let rc = unsafe { ioctl(STDOUT_FILENO, TIOCGWINSZ, &mut ws as *mut Winsize) };
    if rc == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some((ws.ws_col, ws.ws_row))
    } else {
        None
    }
}

#[cfg(windows)]
fn platform_size() -> Option<(u16, u16)> {
    use std::ffi::c_void;

    #[repr(C)]
    #[derive(Clone, Copy, Default)]
    #[allow(non_snake_case)]
    struct Coord {
        X: i16,
        Y: i16,
    }

    #[repr(C)]
    #[derive(Clone, Copy, Default)]
    #[allow(non_snake_case)]
    struct SmallRect {
        Left: i16,
        Top: i16,
        Right: i16,
        Bottom: i16,
    }

    #[repr(C)]
    #[derive(Clone, Copy, Default)]
    #[allow(non_snake_case)]
    struct ConsoleScreenBufferInfo {
        dwSize: Coord,
        dwCursorPosition: Coord,
        wAttributes: u16,
        srWindow: SmallRect,
        dwMaximumWindowSize: Coord,
    }

    const STD_OUTPUT_HANDLE: u32 = -11i32 as u32;

    #[link(name = "kernel32")]
    extern "system" {
        fn GetStdHandle(nStdHandle: u32) -> *mut c_void;
        fn GetConsoleScreenBufferInfo(
            hConsoleOutput: *mut c_void,
            lpConsoleScreenBufferInfo: *mut ConsoleScreenBufferInfo,
        ) -> i32;
    }

    unsafe {
        let handle = GetStdHandle(STD_OUTPUT_HANDLE);
        if handle.is_null() {
            return None;
        }
        let mut info = ConsoleScreenBufferInfo::default();
        if GetConsoleScreenBufferInfo(handle, &mut info) == 0 {
            return None;
        }
        let columns = (info.srWindow.Right - info.srWindow.Left + 1).max(0) as u16;
        let lines = (info.srWindow.Bottom - info.srWindow.Top + 1).max(0) as u16;
        if columns > 0 && lines > 0 {
            Some((columns, lines))
        } else {
            None
        }
    }
}

#[cfg(not(any(unix, windows)))]
fn platform_size() -> Option<(u16, u16)> {
    None
}
