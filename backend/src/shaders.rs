use super::glutils::*;
use anyhow::{anyhow, bail, Context, Result};
use gl::{types::*, *};
use log::debug;
use std::ffi::CString;

pub const GLSL_VERSION_HEADER: &str = "#version 330\n\n";

/// Prefixes a shader body with the GLSL version directive.
pub fn versioned_source(body: &str) -> String {
    format!("{GLSL_VERSION_HEADER}{}", body.trim_start_matches('\n'))
}

/// A linked vertex + fragment program.
#[derive(Debug)]
pub struct Shaders {
    program_id: u32,
}

impl Shaders {
    pub fn from_str(vertex_code: &str, fragment_code: &str) -> Result<Shaders> {
        let vertex_shader = Self::compile(VERTEX_SHADER, vertex_code)
            .context("vertex shader compilation error")?;

        let fragment_shader = match Self::compile(FRAGMENT_SHADER, fragment_code) {
            Ok(s) => s,
            Err(e) => {
                unsafe { gl::DeleteShader(vertex_shader) };
                return Err(e.context("fragment shader compilation error"));
            }
        };

        let linked = Self::link(&[vertex_shader, fragment_shader]);

        // not needed anymore
        unsafe { gl::DeleteShader(vertex_shader) };
        unsafe { gl::DeleteShader(fragment_shader) };

        let program_id = linked?;
        debug!("program({program_id}) linked");
        Ok(Shaders { program_id })
    }

    fn compile(kind: GLenum, shader_code: &str) -> Result<u32> {
        let shader_id = unsafe { gl::CreateShader(kind) };
        if shader_id == 0 {
            bail!("gl::CreateShader(0x{kind:04x}) failed");
        }

        unsafe {
            gl::ShaderSource(
                shader_id,
                1,
                &(shader_code.as_bytes().as_ptr().cast()),
                &(shader_code.len() as GLint),
            );
        }

        unsafe { gl::CompileShader(shader_id) };

        // check if there are compilation errors
        let mut success = 0;
        unsafe {
            gl::GetShaderiv(shader_id, COMPILE_STATUS, &mut success);
        }

        if success == 0 {
            let mut log_len = 0;
            unsafe { gl::GetShaderiv(shader_id, INFO_LOG_LENGTH, &mut log_len) };
            let mut v = vec![0_u8; log_len.max(1) as usize];
            let mut written = 0;
            unsafe {
                gl::GetShaderInfoLog(shader_id, v.len() as GLint, &mut written, v.as_mut_ptr().cast());
                gl::DeleteShader(shader_id);
            }
            bail!("{}", info_log_to_string(v, written.max(0) as usize));
        }
        Ok(shader_id)
    }

    fn link(shaders: &[u32]) -> Result<u32> {
        if shaders.is_empty() {
            bail!("no shaders provided");
        }

        let shader_program = unsafe { gl::CreateProgram() };
        for shader in shaders {
            unsafe { gl::AttachShader(shader_program, *shader) };
        }

        unsafe { gl::LinkProgram(shader_program) };

        for shader in shaders {
            unsafe { gl::DetachShader(shader_program, *shader) };
        }

        let mut success = 0;
        unsafe {
            gl::GetProgramiv(shader_program, LINK_STATUS, &mut success);
        }
        if success == 0 {
            let mut log_len = 0;
            unsafe { gl::GetProgramiv(shader_program, INFO_LOG_LENGTH, &mut log_len) };
            let mut v = vec![0_u8; log_len.max(1) as usize];
            let mut written = 0;
            unsafe {
                gl::GetProgramInfoLog(
                    shader_program,
                    v.len() as GLint,
                    &mut written,
                    v.as_mut_ptr().cast(),
                );
                gl::DeleteProgram(shader_program);
            }
            bail!(
                "program link error: {}",
                info_log_to_string(v, written.max(0) as usize)
            );
        }

        Ok(shader_program)
    }

    pub fn attrib_location(&self, name: &str) -> Result<u32> {
        let c_name = CString::new(name)
            .map_err(|_| anyhow!("attribute name '{}' contains a NUL byte", name))?;
        let location = unsafe { gl::GetAttribLocation(self.program_id, c_name.as_ptr().cast()) };
        attrib_index(name, location)
    }

    pub fn use_program(&self) {
        unsafe { gl::UseProgram(self.program_id) };
    }

    pub fn unuse_program(&self) {
        unsafe { gl::UseProgram(0) };
    }
}

impl Drop for Shaders {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.program_id) };
    }
}

fn attrib_index(name: &str, location: GLint) -> Result<u32> {
    u32::try_from(location).map_err(|_| anyhow!("program attribute not found: {}", name))
}
