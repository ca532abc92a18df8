//! Rendering: backdrop, star sprites, ship parts, then the screen overlay.

mod overlay;

use anyhow::Result;
use renderer::Blend;

use crate::scene;
use crate::Showcase;

/// Run all render passes for one frame. Called from `Showcase::render()`.
pub fn run(state: &mut Showcase) -> Result<()> {
    let (output, mut encoder) = state.renderer.begin_frame()?;
    let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
    let (sw, sh) = state.renderer.dimensions();
    let (sw, sh) = (sw as f32, sh as f32);

    state.renderer.update_camera(&state.camera);
    state.renderer.render_backdrop(&mut encoder, &view, &state.backdrop_mesh);

    // The loading screen covers everything, so skip the 3D passes until it is gone.
    if state.loading.is_none() {
        let elapsed = state.time.elapsed_seconds();
        let stars = scene::star_instances(
            &state.stars,
            state.camera.transform.rotation,
            elapsed,
            state.star_twinkle_speed,
        );
        state
            .renderer
            .draw_instanced(&mut encoder, &view, &state.star_mesh, &stars, Blend::Translucent);

        let batches = scene::build_instances(&state.world, state.hull);
        for (index, part) in state.hull.draw_order() {
            let blend = if part.slot.is_translucent() { Blend::Translucent } else { Blend::Opaque };
            state
                .renderer
                .draw_instanced(&mut encoder, &view, &state.part_meshes[index], &batches[index], blend);
        }
    }

    let tb = overlay::build(state, sw, sh);
    state.renderer.render_overlay(&mut encoder, &view, &tb.vertices, &tb.indices);
    state.renderer.end_frame(output, encoder);
    Ok(())
}
