use anyhow::{Context, Result};
use backend::config::Config;
use backend::mesh::StaticMesh;
use backend::shaders::{versioned_source, Shaders};

const VERTEX_SHADER_BODY: &str = r#"
in vec3 vert;

void main() {
    gl_Position = vec4(vert, 1);
}
"#;

const FRAGMENT_SHADER_BODY: &str = r#"
out vec4 outputColor;

void main() {
    outputColor = vec4(1.0, 1.0, 1.0, 1.0);
}
"#;

pub const POSITION_ATTRIB: &str = "vert";
pub const POSITION_COMPONENTS: u32 = 3;

#[rustfmt::skip]
pub const TRIANGLE: [f32; 9] = [
    //  X     Y    Z
     0.0,  0.8, 0.0,
    -0.8, -0.8, 0.0,
     0.8, -0.8, 0.0,
];

pub struct Scene {
    // mesh first, it was built against the program
    mesh: StaticMesh,
    program: Shaders,
}

impl Scene {
    pub fn load() -> Result<Scene> {
        let program = Shaders::from_str(
            &versioned_source(VERTEX_SHADER_BODY),
            &versioned_source(FRAGMENT_SHADER_BODY),
        )
        .context("Failed to create program")?;

        let mesh = StaticMesh::new(&program, POSITION_ATTRIB, &TRIANGLE, POSITION_COMPONENTS)
            .context("Failed to load triangle")?;

        Ok(Scene { mesh, program })
    }

    pub fn draw(&self) {
        self.program.use_program();
        self.mesh.draw();
        self.program.unuse_program();
    }
}

pub fn setup_scene(cfg: &Config) {
    let [r, g, b, a] = cfg.clear_color;
    unsafe {
        gl::Enable(gl::DEPTH_TEST);
        gl::DepthFunc(gl::LESS);
        gl::ClearColor(r, g, b, a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_is_flat_and_on_screen() {
        assert_eq!(TRIANGLE.len() as u32 % POSITION_COMPONENTS, 0);
        for v in TRIANGLE.chunks(POSITION_COMPONENTS as usize) {
            assert!(v[0].abs() <= 1.0 && v[1].abs() <= 1.0);
            assert_eq!(v[2], 0.0);
        }
    }

    #[test]
    fn shaders_share_the_position_attribute() {
        let vs = versioned_source(VERTEX_SHADER_BODY);
        assert!(vs.starts_with("#version 330"));
        assert!(vs.contains(&format!("in vec3 {POSITION_ATTRIB};")));
        assert!(versioned_source(FRAGMENT_SHADER_BODY).contains("out vec4 outputColor;"));
    }
}
