use std::io::BufRead;
use std::sync::mpsc;

use engine_logging::engine_warn;

use super::app::AppEvent;

/// Forwards each line as a submission, then reports the end of input.
pub fn forward_lines<R: BufRead>(reader: R, tx: mpsc::Sender<AppEvent>) {
    for line in reader.lines() {
        match line {
            Ok(line) => {
                if tx.send(AppEvent::Line(line)).is_err() {
                    return;
                }
            }
            Err(err) => {
                engine_warn!("Stopped reading input: {}", err);
                break;
            }
        }
    }
    let _ = tx.send(AppEvent::InputClosed);
}
