use core::fmt;

/// Writes straight to file descriptor 1, bypassing any buffering.
#[derive(Default)]
#[doc(hidden)]
pub struct StdoutFormat;

#[cfg(target_os = "linux")]
impl fmt::Write for StdoutFormat {
  fn write_str(&mut self, s: &str) -> fmt::Result {
    use syscalls::{Sysno, syscall};

    let mut remaining = s.as_bytes();
    while !remaining.is_empty() {
      let written =
        unsafe { syscall!(Sysno::write, 1i32, remaining.as_ptr(), remaining.len()) }.map_err(|_| fmt::Error)?;
      remaining = &remaining[written..];
    }

    Ok(())
  }
}

#[cfg(not(target_os = "linux"))]
impl fmt::Write for StdoutFormat {
  fn write_str(&mut self, s: &str) -> fmt::Result {
    use std::io::Write;

    std::io::stdout().write_all(s.as_bytes()).map_err(|_| fmt::Error)
  }
}

#[macro_export]
#[doc(hidden)]
macro_rules! println {
  () => {
    $crate::println!("")
  };
  ($($arg: tt)*) => {
    {
      use ::core::fmt::Write;
      writeln!(&mut $crate::StdoutFormat::default(), $($arg)*).expect("failed to print message");
    }
  };
}
