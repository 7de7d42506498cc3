//! 控制台日志宏
//!
//! wasm 目标写入浏览器控制台，原生目标（单元测试）写入标准输出，
//! 使传输层等平台无关代码可以在两种环境下打日志。

macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&format!($($arg)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        println!($($arg)*);
    }};
}

macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&format!($($arg)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!($($arg)*);
    }};
}

pub(crate) use {log_info, log_warn};
