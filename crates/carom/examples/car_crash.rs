use carom::{
    prelude::*,
    scenario::{WORLD_HEIGHT, WORLD_WIDTH},
};
use serde::Serialize;
use speedy2d::{
    color::Color,
    dimen::Vec2,
    window::{KeyScancode, VirtualKeyCode, WindowHandler, WindowHelper},
    Graphics2D, Window,
};

const DT: FloatNum = 0.1;

#[derive(Serialize)]
struct BodySnapshot {
    id: ID,
    position: [FloatNum; 2],
    velocity: [FloatNum; 2],
    angle: FloatNum,
    angle_velocity: FloatNum,
    mass: Mass,
    momentum: [FloatNum; 2],
    kinetic_energy: FloatNum,
}

impl From<&RigidBody> for BodySnapshot {
    fn from(body: &RigidBody) -> Self {
        let (position, velocity, motion) = (body.position(), body.velocity(), body.motion());
        Self {
            id: body.id(),
            position: [position.x(), position.y()],
            velocity: [velocity.x(), velocity.y()],
            angle: body.orientation(),
            angle_velocity: body.angle_velocity(),
            mass: body.mass(),
            momentum: [motion.x(), motion.y()],
            kinetic_energy: body.kinetic_energy(),
        }
    }
}

struct Handler {
    scene: Scene,
    scenario: Scenario,
    parameters: ScenarioParameters,
    is_running: bool,
}

fn into_vec2(p: Point) -> Vec2 {
    Vec2::new(p.x(), p.y())
}

impl Handler {
    fn reload(&mut self) {
        if let Err(err) = self.scene.load_scenario(self.scenario, &self.parameters) {
            log::error!("can't load scenario `{}`: {err}", self.scenario.label());
        }
    }

    fn adjust(&mut self, key: VirtualKeyCode) -> bool {
        let parameters = &mut self.parameters;
        match key {
            VirtualKeyCode::Q => parameters.nudge_mass(BodySlot::A, Nudge::Up),
            VirtualKeyCode::W => parameters.nudge_mass(BodySlot::A, Nudge::Down),
            VirtualKeyCode::A => parameters.nudge_speed(BodySlot::A, Nudge::Up),
            VirtualKeyCode::S => parameters.nudge_speed(BodySlot::A, Nudge::Down),
            VirtualKeyCode::E => parameters.nudge_mass(BodySlot::B, Nudge::Up),
            VirtualKeyCode::D => parameters.nudge_mass(BodySlot::B, Nudge::Down),
            VirtualKeyCode::Z => parameters.nudge_speed(BodySlot::B, Nudge::Up),
            VirtualKeyCode::X => parameters.nudge_speed(BodySlot::B, Nudge::Down),
            VirtualKeyCode::C => parameters.nudge_restitution(Nudge::Up),
            VirtualKeyCode::V => parameters.nudge_restitution(Nudge::Down),
            VirtualKeyCode::F => parameters.nudge_friction(Nudge::Up),
            VirtualKeyCode::G => parameters.nudge_friction(Nudge::Down),
            _ => {
                let number = match key {
                    VirtualKeyCode::Key1 => 1,
                    VirtualKeyCode::Key2 => 2,
                    VirtualKeyCode::Key3 => 3,
                    VirtualKeyCode::Key4 => 4,
                    _ => return false,
                };
                if let Some(scenario) = Scenario::from_number(number) {
                    self.scenario = scenario;
                }
                return true;
            }
        };
        true
    }

    fn dump_snapshot(&self) {
        let snapshot: Vec<BodySnapshot> = self.scene.bodies_iter().map(Into::into).collect();
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("snapshot failed: {err}"),
        }
    }

    fn title(&self) -> String {
        let motion = self.scene.total_motion();
        format!(
            "{} | m1 {} v1 {} | m2 {} v2 {} | e {:.1} friction {:.2} | p ({:.0}, {:.0}) | {}",
            self.scenario.label(),
            self.parameters.mass_a(),
            self.parameters.speed_a(),
            self.parameters.mass_b(),
            self.parameters.speed_b(),
            self.parameters.restitution(),
            self.parameters.friction(),
            motion.x(),
            motion.y(),
            if self.is_running { "running" } else { "paused" },
        )
    }
}

impl WindowHandler for Handler {
    fn on_key_down(
        &mut self,
        helper: &mut WindowHelper<()>,
        virtual_key_code: Option<VirtualKeyCode>,
        _scancode: KeyScancode,
    ) {
        let Some(key) = virtual_key_code else {
            return;
        };

        match key {
            VirtualKeyCode::R => {
                self.is_running = false;
                self.reload();
            }
            VirtualKeyCode::Space => self.is_running = !self.is_running,
            VirtualKeyCode::P => self.dump_snapshot(),
            key if !self.is_running => {
                if self.adjust(key) {
                    self.reload();
                }
            }
            _ => {}
        }

        helper.set_title(self.title());
    }

    fn on_draw(&mut self, helper: &mut WindowHelper<()>, graphics: &mut Graphics2D) {
        if self.is_running {
            if let Err(err) = self.scene.tick(DT) {
                log::error!("tick failed: {err}");
                self.is_running = false;
            }
            helper.set_title(self.title());
        }

        graphics.clear_screen(Color::WHITE);

        let road_top = WORLD_HEIGHT / 2. - 100.;
        graphics.draw_rectangle(
            speedy2d::shape::Rectangle::new(
                Vec2::new(0., road_top),
                Vec2::new(WORLD_WIDTH, road_top + 200.),
            ),
            Color::from_gray(0.6),
        );

        for (index, body) in self.scene.bodies_iter().enumerate() {
            let color = if index == 0 { Color::RED } else { Color::BLUE };
            graphics.draw_quad(body.corner_points().map(into_vec2), color);
            graphics.draw_circle(into_vec2(body.position()), 3., Color::BLACK);

            let velocity = body.velocity();
            if velocity.abs() > 0.1 {
                graphics.draw_line(
                    into_vec2(body.position()),
                    into_vec2(body.position() + velocity * 5.),
                    2.,
                    Color::GREEN,
                );
            }
        }

        helper.request_redraw();
    }
}

fn main() {
    let config = simplelog::ConfigBuilder::new()
        .set_target_level(simplelog::LevelFilter::Off)
        .set_location_level(simplelog::LevelFilter::Off)
        .build();
    if let Err(err) =
        simplelog::WriteLogger::init(simplelog::LevelFilter::Debug, config, std::io::stderr())
    {
        eprintln!("logger already installed: {err}");
    }

    let mut handler = Handler {
        scene: Scene::with_capacity(2),
        scenario: Scenario::default(),
        parameters: ScenarioParameters::default(),
        is_running: false,
    };
    handler.reload();
    handler.scene.register_collision_callback(|id_a, id_b, resolution| {
        log::info!(
            "collision {id_a} <-> {id_b}, impulse {:.1}",
            resolution.impulse()
        );
    });

    let window = Window::new_centered(
        "car crash",
        (WORLD_WIDTH as u32, WORLD_HEIGHT as u32),
    )
    .unwrap();

    window.run_loop(handler)
}
