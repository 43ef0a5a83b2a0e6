//! Background task that turns button edges into queued presses.
//!
//! The task owns both [`Button`]s and the [`PressProducer`] and waits on each
//! button independently; the session only ever sees the [`PressQueue`] and the
//! [`ClickCounter`].

use embassy_executor::Spawner;
use embassy_futures::join::join;
use embassy_time::Instant;

use crate::Result;
use crate::button::Button;
use crate::click_counter::ClickCounter;
use crate::press::{ButtonId, PressProducer, PressQueue};

/// Spawns the edge task for the confirm and increment buttons.
///
/// # Errors
///
/// Returns [`Error::TaskSpawn`](crate::Error::TaskSpawn) if the task is already running.
pub fn spawn_button_task(
    spawner: Spawner,
    confirm: Button<'static>,
    increment: Button<'static>,
    counter: &'static ClickCounter,
    queue: &'static PressQueue,
) -> Result<()> {
    let token = button_task(confirm, increment, PressProducer::new(counter, queue));
    spawner.spawn(token).map_err(crate::Error::TaskSpawn)?;
    defmt::info!("button task started");
    Ok(())
}

#[embassy_executor::task]
async fn button_task(
    mut confirm: Button<'static>,
    mut increment: Button<'static>,
    producer: PressProducer<'static>,
) -> ! {
    // One loop per button, so a press on one never cancels the other's edge wait.
    loop {
        join(
            edge_loop(&mut confirm, ButtonId::Confirm, &producer),
            edge_loop(&mut increment, ButtonId::Increment, &producer),
        )
        .await;
    }
}

async fn edge_loop(button: &mut Button<'static>, id: ButtonId, producer: &PressProducer<'_>) {
    loop {
        button.wait_for_press_edge().await;
        if !producer.on_edge(id, Instant::now()) {
            defmt::trace!("button task: {} edge inside debounce window", id);
        }
    }
}
