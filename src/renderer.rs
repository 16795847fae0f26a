use crate::camera::Camera;
use crate::constants::BACKGROUND_COLOR;
use crate::surface::{RectPrimitive, Surface};
use glow::*;
use std::mem;
use std::sync::Arc;

const VERTEX_SHADER_SRC: &str = r#"#version 330 core
layout (location = 0) in vec2 aPos;
layout (location = 1) in vec2 aInstancePos;
layout (location = 2) in vec2 aInstanceSize;
layout (location = 3) in vec3 aInstanceColor;

uniform mat4 uProjection;

out vec3 vColor;

void main() {
    vec2 worldPos = aInstancePos + aPos * aInstanceSize;
    gl_Position = uProjection * vec4(worldPos, 0.0, 1.0);
    vColor = aInstanceColor;
}
"#;

const FRAGMENT_SHADER_SRC: &str = r#"#version 330 core
in vec3 vColor;
out vec4 FragColor;

void main() {
    FragColor = vec4(vColor, 1.0);
}
"#;

/// Position (2) + size (2) + color (3)
const FLOATS_PER_INSTANCE: usize = 7;
const INSTANCE_STRIDE: i32 = (FLOATS_PER_INSTANCE * mem::size_of::<f32>()) as i32;

/// Instanced renderer for the surface's flat rectangles.
pub struct Renderer {
    gl: Arc<glow::Context>,
    program: NativeProgram,
    vao: NativeVertexArray,
    vbo: NativeBuffer,
    instance_vbo: NativeBuffer,
    projection_loc: NativeUniformLocation,
}

impl Renderer {
    pub fn new(gl: Arc<glow::Context>) -> Result<Self, String> {
        unsafe {
            let vertex_shader = gl
                .create_shader(VERTEX_SHADER)
                .map_err(|e| format!("Failed to create vertex shader: {}", e))?;
            gl.shader_source(vertex_shader, VERTEX_SHADER_SRC);
            gl.compile_shader(vertex_shader);
            if !gl.get_shader_compile_status(vertex_shader) {
                return Err(gl.get_shader_info_log(vertex_shader));
            }

            let fragment_shader = gl
                .create_shader(FRAGMENT_SHADER)
                .map_err(|e| format!("Failed to create fragment shader: {}", e))?;
            gl.shader_source(fragment_shader, FRAGMENT_SHADER_SRC);
            gl.compile_shader(fragment_shader);
            if !gl.get_shader_compile_status(fragment_shader) {
                return Err(gl.get_shader_info_log(fragment_shader));
            }

            let program = gl
                .create_program()
                .map_err(|e| format!("Failed to create program: {}", e))?;
            gl.attach_shader(program, vertex_shader);
            gl.attach_shader(program, fragment_shader);
            gl.link_program(program);
            if !gl.get_program_link_status(program) {
                return Err(gl.get_program_info_log(program));
            }

            gl.delete_shader(vertex_shader);
            gl.delete_shader(fragment_shader);

            let projection_loc = gl
                .get_uniform_location(program, "uProjection")
                .ok_or("Failed to get projection uniform location")?;

            // Unit quad, scaled per instance
            let vertices: [f32; 12] = [
                0.0, 0.0, //
                1.0, 0.0, //
                1.0, 1.0, //
                0.0, 0.0, //
                1.0, 1.0, //
                0.0, 1.0, //
            ];

            let vao = gl
                .create_vertex_array()
                .map_err(|e| format!("Failed to create VAO: {}", e))?;
            gl.bind_vertex_array(Some(vao));

            let vbo = gl
                .create_buffer()
                .map_err(|e| format!("Failed to create VBO: {}", e))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(ARRAY_BUFFER, as_u8_slice(&vertices), STATIC_DRAW);

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, FLOAT, false, 8, 0);

            let instance_vbo = gl
                .create_buffer()
                .map_err(|e| format!("Failed to create instance VBO: {}", e))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(instance_vbo));

            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 2, FLOAT, false, INSTANCE_STRIDE, 0);
            gl.vertex_attrib_divisor(1, 1);

            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(2, 2, FLOAT, false, INSTANCE_STRIDE, 8);
            gl.vertex_attrib_divisor(2, 1);

            gl.enable_vertex_attrib_array(3);
            gl.vertex_attrib_pointer_f32(3, 3, FLOAT, false, INSTANCE_STRIDE, 16);
            gl.vertex_attrib_divisor(3, 1);

            gl.bind_vertex_array(None);

            let [r, g, b] = BACKGROUND_COLOR;
            gl.clear_color(r, g, b, 1.0);

            Ok(Self {
                gl,
                program,
                vao,
                vbo,
                instance_vbo,
                projection_loc,
            })
        }
    }

    pub fn resize(&self, width: i32, height: i32) {
        unsafe {
            self.gl.viewport(0, 0, width, height);
        }
    }

    /// Clear to the background color and draw every visible rectangle in
    /// insertion order.
    pub fn render(&mut self, camera: &Camera, surface: &Surface) -> Result<(), String> {
        puffin::profile_function!();

        let instance_data = build_instances(camera, surface.rects());

        unsafe {
            let [r, g, b] = BACKGROUND_COLOR;
            self.gl.clear_color(r, g, b, 1.0);
            self.gl.clear(COLOR_BUFFER_BIT);

            if instance_data.is_empty() {
                return Ok(());
            }

            self.gl.use_program(Some(self.program));
            self.gl.bind_vertex_array(Some(self.vao));

            self.gl.bind_buffer(ARRAY_BUFFER, Some(self.instance_vbo));
            self.gl
                .buffer_data_u8_slice(ARRAY_BUFFER, as_u8_slice(&instance_data), DYNAMIC_DRAW);

            let projection = camera.projection_matrix();
            self.gl
                .uniform_matrix_4_f32_slice(Some(&self.projection_loc), false, projection.as_ref());

            let instance_count = instance_data.len() / FLOATS_PER_INSTANCE;
            self.gl.draw_arrays_instanced(TRIANGLES, 0, 6, instance_count as i32);

            self.gl.bind_vertex_array(None);
            self.gl.use_program(None);
        }

        Ok(())
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program);
            self.gl.delete_vertex_array(self.vao);
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_buffer(self.instance_vbo);
        }
    }
}

/// Flatten the rectangles the camera can see into instance attributes.
fn build_instances(camera: &Camera, rects: &[RectPrimitive]) -> Vec<f32> {
    let visible = camera.visible_bounds();
    let mut data = Vec::with_capacity(rects.len() * FLOATS_PER_INSTANCE);

    for rect in rects {
        let max = rect.position + rect.size;
        if max.x < visible.min.x
            || max.y < visible.min.y
            || rect.position.x > visible.max().x
            || rect.position.y > visible.max().y
        {
            continue;
        }
        data.extend_from_slice(&[rect.position.x, rect.position.y, rect.size.x, rect.size.y]);
        data.extend_from_slice(&rect.color);
    }

    data
}

fn as_u8_slice<T>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, mem::size_of_val(data)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_offscreen_rects_are_culled() {
        let camera = Camera::new(800.0, 600.0);
        let rects = [
            RectPrimitive::new(Vec2::new(10.0, 10.0), Vec2::splat(50.0), [1.0, 0.0, 0.0]),
            RectPrimitive::new(Vec2::new(2000.0, 10.0), Vec2::splat(50.0), [0.0, 1.0, 0.0]),
            RectPrimitive::new(Vec2::new(-40.0, -40.0), Vec2::splat(50.0), [0.0, 0.0, 1.0]),
        ];

        let data = build_instances(&camera, &rects);
        assert_eq!(data.len(), 2 * FLOATS_PER_INSTANCE);
        assert_eq!(&data[..FLOATS_PER_INSTANCE], &[10.0, 10.0, 50.0, 50.0, 1.0, 0.0, 0.0]);
        assert_eq!(data[FLOATS_PER_INSTANCE + 6], 1.0);
    }
}
