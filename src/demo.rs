// Button handlers shipped with the robot: a movement test on B and an HTTP
// connectivity check on A

use tracing::{info, warn};

use crate::buttons::{Button, ButtonRegistry};
use crate::hal::{Board, HttpClient, Result};
use crate::motion::MoveRequest;
use crate::robot::MbotNeo;

/// Context handed to every button handler
pub struct App<B: Board, H: HttpClient> {
    pub robot: MbotNeo<B>,
    pub http: H,
    pub test_url: String,
}

/// Bind the movement test to B and the HTTP check to A
pub fn register_handlers<B, H>(registry: &mut ButtonRegistry<App<B, H>>)
where
    B: Board + 'static,
    H: HttpClient + 'static,
{
    registry.on_press(Button::A, http_request::<B, H>);
    registry.on_press(Button::B, move_actions::<B, H>);
}

pub fn startup_banner<B: Board>(robot: &mut MbotNeo<B>) -> Result<()> {
    robot.print("Press A to test HTTP request")?;
    robot.print_line(" ")?;
    robot.print_line("Press B to test movement")
}

pub fn move_actions<B: Board, H: HttpClient>(app: &mut App<B, H>) {
    if let Err(e) = movement_sequence(&mut app.robot) {
        warn!("Movement test aborted: {}", e);
    }
}

/// Exercise every direction with defaults, with explicit time (which wins
/// over the distance also given), and with explicit distance or angle
pub fn movement_sequence<B: Board>(robot: &mut MbotNeo<B>) -> Result<()> {
    info!("Running movement test");

    robot.move_forward(MoveRequest::new())?;
    robot.turn_left(MoveRequest::new())?;
    robot.turn_right(MoveRequest::new())?;
    robot.move_backward(MoveRequest::new())?;

    let fast = MoveRequest::new().speed(150.0).time(0.5).distance(5.0);
    let slow_turn = MoveRequest::new().speed(25.0).time(2.0).angle(5.0);
    robot.move_forward(fast)?;
    robot.turn_left(slow_turn)?;
    robot.turn_right(slow_turn)?;
    robot.move_backward(fast)?;

    robot.move_forward(MoveRequest::new().distance(32.0))?;
    robot.turn_left(MoveRequest::new().angle(90.0))?;
    robot.turn_right(MoveRequest::new().angle(90.0))?;
    robot.move_backward(MoveRequest::new().distance(32.0))?;
    Ok(())
}

pub fn http_request<B: Board, H: HttpClient>(app: &mut App<B, H>) {
    let App { robot, http, test_url } = app;
    if let Err(e) = http_check(robot, http, test_url) {
        warn!("HTTP test could not update the display: {}", e);
    }
}

/// GET `url` and report the status code on the display.
/// Transport failures are shown, not retried.
pub fn http_check<B: Board, H: HttpClient>(
    robot: &mut MbotNeo<B>,
    http: &mut H,
    url: &str,
) -> Result<()> {
    robot.print("Sending HTTP request...")?;
    info!("GET {}", url);

    let response = match http.get(url) {
        Ok(response) => response,
        Err(e) => {
            warn!("HTTP request to {} failed: {}", url, e);
            robot.print_line(" ")?;
            return robot.print_line(&format!("Request failed: {}", e));
        }
    };

    info!("GET {} -> {}", url, response.status);
    robot.print_line(" ")?;
    robot.print_line(&format!("Status code: {}", response.status))?;
    if response.status == 200 {
        robot.print_line("Success!")?;
    }
    Ok(())
}
