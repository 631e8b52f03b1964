//! Input systems (Update, WalkthroughSet::Input)
//!
//! Порядок: process_xr_events → tick_controller_presence →
//! sample_input_sources → update_gaze_dwell → arbitrate_input

use bevy::prelude::*;

use super::arbitration::{arbitrate, ArbitrationInput, ArbitrationState, Joystick};
use super::components::{Affordance, DeviceId, SelectionState, XrController};
use super::events::{GazeFallbackActivated, XrInputEvent};
use super::gaze::GazeDwell;
use super::presence::{ControllerPresence, InputSourceSampler};
use super::session::{HeadPose, XrSession};
use crate::config::WalkthroughConfig;
use crate::logger;

/// Сколько controller slots создаём (XR API: 0 и 1)
pub const CONTROLLER_SLOTS: u8 = 2;

/// Startup: controller slots заранее, connected=false
pub fn spawn_controller_slots(mut commands: Commands) {
    for index in 0..CONTROLLER_SLOTS {
        commands.spawn((
            XrController::new(DeviceId(index)),
            SelectionState::default(),
            Affordance::default(),
            Transform::default(),
        ));
    }
}

/// Система: XR события → session / presence / selection state
pub fn process_xr_events(
    mut events: EventReader<XrInputEvent>,
    mut session: ResMut<XrSession>,
    mut presence: ResMut<ControllerPresence>,
    mut sampler: ResMut<InputSourceSampler>,
    mut gaze: ResMut<GazeDwell>,
    mut controllers: Query<(&mut XrController, &mut SelectionState, &mut Affordance)>,
) {
    for event in events.read() {
        match event {
            XrInputEvent::SessionStarted => {
                session.immersive = true;
                presence.start_session();
                sampler.reset();
                gaze.reset();
                logger::log_info("XR session started, waiting for controller connection");
            }

            XrInputEvent::SessionEnded => {
                session.immersive = false;
                session.input_source_count = 0;
                presence.end_session();
                sampler.reset();
                gaze.reset();

                for (mut controller, mut selection, mut affordance) in controllers.iter_mut() {
                    controller.connected = false;
                    selection.disconnect();
                    affordance.clear();
                }
                logger::log_info("XR session ended");
            }

            XrInputEvent::ControllerConnected { device, kind } => {
                presence.on_controller_connected();

                let Some((mut controller, mut selection, mut affordance)) = controllers
                    .iter_mut()
                    .find(|(controller, ..)| controller.device == *device)
                else {
                    logger::log_warning(&format!("ControllerConnected: unknown device {:?}", device));
                    continue;
                };

                controller.connected = true;
                controller.kind = *kind;
                selection.release();
                *affordance = Affordance::for_kind(*kind);
                logger::log_info(&format!("Controller {:?} connected ({:?})", device, kind));
            }

            XrInputEvent::ControllerDisconnected { device } => {
                let Some((mut controller, mut selection, mut affordance)) = controllers
                    .iter_mut()
                    .find(|(controller, ..)| controller.device == *device)
                else {
                    logger::log_warning(&format!("ControllerDisconnected: unknown device {:?}", device));
                    continue;
                };

                controller.connected = false;
                selection.disconnect();
                affordance.clear();
                logger::log_info(&format!("Controller {:?} disconnected", device));
            }

            XrInputEvent::SelectStart { device } | XrInputEvent::SelectEnd { device } => {
                let Some((_, mut selection, mut affordance)) = controllers
                    .iter_mut()
                    .find(|(controller, ..)| controller.device == *device)
                else {
                    logger::log_warning(&format!("Select event: unknown device {:?}", device));
                    continue;
                };

                if matches!(event, XrInputEvent::SelectStart { .. }) {
                    selection.press();
                } else {
                    selection.release();
                }
                affordance.on_selection(*selection);
            }
        }
    }
}

/// Система: connect timeout → gaze fallback (один раз за session)
pub fn tick_controller_presence(
    time: Res<Time>,
    config: Res<WalkthroughConfig>,
    mut presence: ResMut<ControllerPresence>,
    mut fallback_events: EventWriter<GazeFallbackActivated>,
) {
    if presence.tick(time.delta_secs(), config.presence.connect_timeout) {
        logger::log_info("No controller connected before timeout, switching to gaze fallback");
        fallback_events.write(GazeFallbackActivated);
    }
}

/// Система: periodic re-sample input sources → gaze eligibility
pub fn sample_input_sources(
    time: Res<Time>,
    config: Res<WalkthroughConfig>,
    session: Res<XrSession>,
    mut sampler: ResMut<InputSourceSampler>,
) {
    sampler.tick(
        time.delta_secs(),
        config.presence.sample_interval,
        session.active_source_count(),
    );
}

/// Система: gaze dwell обновляется только когда gaze реально используется
pub fn update_gaze_dwell(
    time: Res<Time>,
    config: Res<WalkthroughConfig>,
    session: Res<XrSession>,
    presence: Res<ControllerPresence>,
    sampler: Res<InputSourceSampler>,
    head: Res<HeadPose>,
    mut gaze: ResMut<GazeDwell>,
) {
    if !(session.immersive && presence.use_gaze() && sampler.is_eligible()) {
        return;
    }

    gaze.update(head.forward(), time.delta_secs(), &config.gaze);
}

/// Система: arbitration → ArbitrationState.current
pub fn arbitrate_input(
    joystick: Option<Res<Joystick>>,
    session: Res<XrSession>,
    presence: Res<ControllerPresence>,
    sampler: Res<InputSourceSampler>,
    gaze: Res<GazeDwell>,
    controllers: Query<(&XrController, &SelectionState)>,
    mut state: ResMut<ArbitrationState>,
) {
    let any_controller_pressed = controllers
        .iter()
        .any(|(controller, selection)| controller.connected && selection.is_pressed());

    let gaze_mode = (presence.use_gaze() && sampler.is_eligible()).then(|| gaze.mode());

    let result = arbitrate(&ArbitrationInput {
        joystick: joystick.as_deref().copied(),
        immersive: session.immersive,
        any_controller_pressed,
        gaze_mode,
        continuity: state.continuity,
    });

    state.continuity = result.triggered_by_input;
    state.current = result;
}
