use super::glutils::*;
use super::shaders::Shaders;
use anyhow::{bail, Result};
use gl::*;
use log::debug;

/// One vertex array object backed by a single `STATIC_DRAW` buffer.
#[derive(Debug)]
pub struct StaticMesh {
    vao: u32,
    vbo: u32,
    vertex_count: i32,
}

impl StaticMesh {
    /// Uploads `data` and binds it to the program attribute `attrib`,
    /// `components` floats per vertex, tightly packed.
    pub fn new(program: &Shaders, attrib: &str, data: &[f32], components: u32) -> Result<StaticMesh> {
        let vertex_count = vertex_count(data.len(), components)?;
        let index = program.attrib_location(attrib)?;

        let mut vao = 0;
        let mut vbo = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);

            gl::GenBuffers(1, &mut vbo);
            gl::BindBuffer(ARRAY_BUFFER, vbo);
        }
        let mesh = StaticMesh {
            vao,
            vbo,
            vertex_count,
        };

        gl_buffer_data_arr_stat(data);
        gl_vertex_attrib_ptr_enab(index, components, 0, 0);

        unsafe {
            gl::BindBuffer(ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }
        check_gl_err("uploading vertex buffer")?;

        debug!(
            "mesh vao={} vbo={}: {} vertices on attribute '{}' ({})",
            vao, vbo, vertex_count, attrib, index
        );
        Ok(mesh)
    }

    pub fn vertex_count(&self) -> i32 {
        self.vertex_count
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(TRIANGLES, 0, self.vertex_count);
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for StaticMesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}

fn vertex_count(floats: usize, components: u32) -> Result<i32> {
    if !(1..=4).contains(&components) {
        bail!("vertex attribute size must be 1..=4, got {components}");
    }
    let components = components as usize;
    if floats == 0 || floats % components != 0 {
        bail!("{floats} floats do not form whole {components}-component vertices");
    }
    Ok(i32::try_from(floats / components)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_vertices() {
        assert_eq!(vertex_count(9, 3).unwrap(), 3);
        assert_eq!(vertex_count(8, 2).unwrap(), 4);
    }

    #[test]
    fn partial_vertex_is_rejected() {
        assert!(vertex_count(8, 3).is_err());
        assert!(vertex_count(0, 3).is_err());
    }

    #[test]
    fn attribute_size_out_of_range() {
        assert!(vertex_count(10, 5).is_err());
        assert!(vertex_count(10, 0).is_err());
    }
}
