use crate::config::{self, Config, FontConfig};
use crate::events::AppEvent;
use crate::gui::canvas::CairoSurface;
use crate::gui::{DEFAULT_WIDTH, TITLE};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use tickwheel::ipc::Command;
use tickwheel::{Wheel, WheelListener};

pub struct AppModel {
    pub wheel: Rc<RefCell<Wheel>>,
    pub title: String,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    PointerDown(f64),
    PointerMove(f64),
    PointerUp,
    PointerCancel,
    Reset,
    Command(Command),
    ConfigReload,
    TrackingStarted,
    ProgressChanged(f64),
    TrackingStopped,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Command(c) => AppMsg::Command(c),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Forwards the wheel's drag notifications into the component's message queue.
struct ComponentListener(ComponentSender<AppModel>);

impl WheelListener for ComponentListener {
    fn on_start_tracking_touch(&mut self) {
        self.0.input(AppMsg::TrackingStarted);
    }

    fn on_progress_changed(&mut self, progress: f64, _from_user: bool) {
        self.0.input(AppMsg::ProgressChanged(progress));
    }

    fn on_stop_tracking_touch(&mut self) {
        self.0.input(AppMsg::TrackingStopped);
    }
}

fn window_title(wheel: &Wheel) -> String {
    format!("{} {}", TITLE, wheel.label())
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Wheel, FontConfig, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            #[watch]
            set_title: Some(&model.title),
            set_default_width: DEFAULT_WIDTH,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Reset);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                set_content_height: preferred_height,

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, _| {
                        sender.input(AppMsg::PointerDown(x));
                    },
                    connect_drag_update[sender] => move |gesture, dx, _| {
                        if let Some((x, _)) = gesture.start_point() {
                            sender.input(AppMsg::PointerMove(x + dx));
                        }
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(AppMsg::PointerUp);
                    },
                    connect_cancel[sender] => move |_, _| {
                        sender.input(AppMsg::PointerCancel);
                    },
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (mut wheel, font, rx) = init;

        wheel.set_listener(Box::new(ComponentListener(sender.clone())));
        let preferred_height = wheel.preferred_height().ceil() as i32;

        let model = AppModel {
            title: window_title(&wheel),
            wheel: Rc::new(RefCell::new(wheel)),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let wheel_draw = model.wheel.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, width, height| {
                let mut wheel = wheel_draw.borrow_mut();
                wheel.resize(f64::from(width), f64::from(height));
                wheel.prepare_frame();
                if let Err(e) = tickwheel::render(&mut CairoSurface::new(cr, &font), &wheel) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::PointerDown(x) => self.wheel.borrow_mut().pointer_down(x),
            AppMsg::PointerMove(x) => self.wheel.borrow_mut().pointer_move(x),
            AppMsg::PointerUp => self.wheel.borrow_mut().pointer_up(),
            AppMsg::PointerCancel => self.wheel.borrow_mut().pointer_cancel(),
            AppMsg::Reset => self.wheel.borrow_mut().set_progress(0.0),
            AppMsg::Command(command) => self.apply_command(command),
            AppMsg::ConfigReload => self.reload_config(),
            AppMsg::TrackingStarted => log::debug!("Tracking started"),
            AppMsg::ProgressChanged(progress) => log::trace!("Progress {progress:.2}"),
            AppMsg::TrackingStopped => {
                log::info!("Selected {}", self.wheel.borrow().label());
            }
        }
        self.title = window_title(&self.wheel.borrow());
        self.drawing_area.queue_draw();
    }
}

impl AppModel {
    fn apply_command(&mut self, command: Command) {
        log::debug!("Applying '{}'", command);
        let mut wheel = self.wheel.borrow_mut();
        match command {
            Command::SetProgress(degree) => wheel.set_progress(degree),
            Command::SetRange(degree) => wheel.set_range(degree),
            Command::SetTheme(theme) => wheel.set_theme(theme),
            Command::Reload => {
                drop(wheel);
                self.reload_config();
            }
        }
    }

    fn reload_config(&mut self) {
        match config::load_config() {
            Ok(new_config) => {
                self.apply_config(&new_config);
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Failed to reload config: {}", e),
        }
    }

    fn apply_config(&mut self, config: &Config) {
        let mut wheel = self.wheel.borrow_mut();
        wheel.set_theme(config.wheel.theme);
        wheel.set_padding(config.wheel.padding);
        wheel.set_range(config.wheel.range);
        self.drawing_area
            .set_content_height(wheel.preferred_height().ceil() as i32);
    }
}
