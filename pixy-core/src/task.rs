//! Camera polling task
//!
//! Runs the decoder in a loop and publishes every frame to a
//! [`SharedFrame`]. Executor-agnostic: spawn [`run`] from an embassy task
//! with the board's timer as the delay.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use pixy_hal::{Uart, UartError};
use pixy_protocol::DecodeOutcome;

use crate::config::PixyConfig;
use crate::driver::{Pixy, PixyError};
use crate::shared::SharedFrame;

/// Decode one frame and publish it
///
/// An idle camera publishes an empty frame, then waits
/// `no_frame_backoff_ms` so the caller does not spin on the UART.
pub async fn poll_once<U, M, D>(
    pixy: &mut Pixy<U>,
    shared: &SharedFrame<M>,
    delay: &mut D,
    config: &PixyConfig,
) -> Result<DecodeOutcome, PixyError<UartError<U>>>
where
    U: Uart,
    M: RawMutex,
    D: DelayNs,
{
    let outcome = pixy.poll()?;
    shared.publish(pixy.frame());

    if outcome == DecodeOutcome::NoFrame {
        delay.delay_ms(config.no_frame_backoff_ms).await;
    }

    Ok(outcome)
}

/// Poll the camera forever
///
/// Transport errors drop any half-read frame and the loop carries on with a
/// full resync.
pub async fn run<U, M, D>(
    mut pixy: Pixy<U>,
    shared: &SharedFrame<M>,
    mut delay: D,
    config: PixyConfig,
) -> !
where
    U: Uart,
    M: RawMutex,
    D: DelayNs,
{
    #[cfg(feature = "defmt")]
    defmt::info!("Pixy task started");

    loop {
        if poll_once(&mut pixy, shared, &mut delay, &config)
            .await
            .is_err()
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("Pixy UART error, resyncing");
            pixy.reset();
        }

        delay.delay_ms(config.poll_interval_ms).await;
    }
}
