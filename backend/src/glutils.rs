use anyhow::{bail, Result};
use gl::{types::*, *};
use log::info;
use std::ffi::CStr;

pub fn check_gl_err(what: &str) -> Result<()> {
    let err = unsafe { gl::GetError() };
    if err == gl::NO_ERROR {
        return Ok(());
    }
    bail!("{what}: GL error 0x{err:04x}");
}

/// Wraps `glGetString`, `None` if the driver returns a null pointer.
pub fn gl_string(name: GLenum) -> Option<String> {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return None;
    }
    let s = unsafe { CStr::from_ptr(ptr.cast()) };
    Some(s.to_string_lossy().into_owned())
}

pub fn log_opengl_info() {
    let get = |name| gl_string(name).unwrap_or_else(|| "<unknown>".to_string());
    info!("OpenGL version: {}", get(VERSION));
    info!("GLSL version: {}", get(SHADING_LANGUAGE_VERSION));
    info!("Vendor: {}", get(VENDOR));
    info!("Renderer: {}", get(RENDERER));
}

pub fn gl_buffer_data_arr_stat<T: Sized>(buffer: &[T]) {
    unsafe {
        gl::BufferData(
            ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            STATIC_DRAW,
        )
    };
}

/// Float attribute, not normalized. `stride` and `pointer` count floats.
pub fn gl_vertex_attrib_ptr_enab(index: u32, size: u32, stride: u32, pointer: usize) {
    unsafe { gl::EnableVertexAttribArray(index) };
    unsafe {
        gl::VertexAttribPointer(
            index,
            size as i32,
            FLOAT,
            FALSE,
            (stride as usize * std::mem::size_of::<f32>()) as i32,
            (pointer * std::mem::size_of::<f32>()) as *const _,
        )
    };
}

/// Turns the bytes written by `glGet{Shader,Program}InfoLog` into text.
pub fn info_log_to_string(mut buf: Vec<u8>, written: usize) -> String {
    buf.truncate(written);
    if let Some(nul) = buf.iter().position(|&b| b == 0) {
        buf.truncate(nul);
    }
    String::from_utf8_lossy(&buf).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_log_stops_at_nul() {
        let buf = b"0:3(1): error: syntax error\n\0\0\0garbage".to_vec();
        let len = buf.len();
        assert_eq!(info_log_to_string(buf, len), "0:3(1): error: syntax error");
    }

    #[test]
    fn info_log_respects_written_length() {
        let buf = b"link failed: missing main".to_vec();
        assert_eq!(info_log_to_string(buf, 11), "link failed");
    }

    #[test]
    fn empty_info_log() {
        assert_eq!(info_log_to_string(vec![0; 8], 0), "");
    }
}
