use crate::{Frame, RenderSurface, Scene};
use orbitview_camera::{OrbitState, PerspectiveCamera};
use orbitview_common::ViewerConfig;
use orbitview_input::{
    ControlSettings, EventResponse, InputRouter, Subscription, ViewEvent, ViewportController,
};

/// The full-window viewer: scene, camera, controller and the surface that
/// draws them.
///
/// Mounting acquires the input subscriptions; they are released when the
/// view is unmounted or dropped.
pub struct MainView<S: RenderSurface> {
    scene: Scene,
    camera: PerspectiveCamera,
    controller: ViewportController,
    surface: S,
    size: (u32, u32),
    dirty: bool,
    _subscriptions: Vec<Subscription>,
}

impl<S: RenderSurface> MainView<S> {
    /// Build the scene, place the camera at the initial orbit, size the
    /// surface and draw the first frame.
    pub fn mount(
        router: &InputRouter,
        config: &ViewerConfig,
        mut surface: S,
        width: u32,
        height: u32,
    ) -> Self {
        let scene = Scene::from_config(config);
        let controller = ViewportController::new(
            OrbitState::from_config(&config.camera, &config.controls),
            ControlSettings::from(&config.controls),
        );

        let mut camera = PerspectiveCamera::from_config(&config.camera);
        camera.apply_pose(&controller.pose());
        camera.set_viewport(width, height);
        surface.resize(width, height);

        let subscriptions = router.subscribe_all();

        tracing::info!(
            width,
            height,
            grid_lines = scene.grid.line_count(),
            "main view mounted"
        );

        let mut view = Self {
            scene,
            camera,
            controller,
            surface,
            size: (width, height),
            dirty: true,
            _subscriptions: subscriptions,
        };
        view.redraw();
        view
    }

    /// Release the input subscriptions and hand back the surface.
    pub fn unmount(self) -> S {
        tracing::info!("main view unmounted");
        self.surface
    }

    /// Apply one routed event. The camera is updated immediately; the draw
    /// happens on the next [`redraw`](Self::redraw).
    pub fn handle(&mut self, event: &ViewEvent) -> EventResponse {
        if let ViewEvent::Resize { width, height } = *event {
            self.size = (width, height);
            self.surface.resize(width, height);
            self.camera.set_viewport(width, height);
        }

        let response = self.controller.handle(event);
        if response.redraw {
            self.camera.apply_pose(&self.controller.pose());
            self.dirty = true;
        }
        response
    }

    /// Return to the initial orientation.
    pub fn reset(&mut self) -> EventResponse {
        let response = self.controller.reset();
        self.camera.apply_pose(&self.controller.pose());
        self.dirty = true;
        response
    }

    /// Issue one draw call if anything changed since the last one.
    /// Returns whether a frame was drawn.
    pub fn redraw(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        self.surface.draw(&Frame {
            scene: &self.scene,
            camera: &self.camera,
            orbit: self.controller.orbit(),
        });
        true
    }

    /// Draw the current state even if nothing changed, e.g. when the window
    /// system asks for the contents again after an expose.
    pub fn repaint(&mut self) {
        self.dirty = true;
        self.redraw();
    }

    /// Mark the view dirty without a state change, e.g. after the surface
    /// lost its contents.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controller(&self) -> &ViewportController {
        &self.controller
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}
