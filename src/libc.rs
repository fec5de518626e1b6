pub fn gethostname() -> Result<String, i32> {
    let mut buf = [0u8; 256];
    let res = unsafe { libc::gethostname(buf.as_mut_ptr().cast::<libc::c_char>(), buf.len()) };
    match res {
        0 => {
            // The buffer is nul terminated unless the name filled it completely
            let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
            Ok(String::from_utf8_lossy(&buf[..len]).into_owned())
        }
        res => Err(res),
    }
}
