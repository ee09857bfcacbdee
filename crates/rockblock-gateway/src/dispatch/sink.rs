use async_trait::async_trait;

use rockblock_core::error::Result;
use rockblock_core::Message;

/// Receives every message that decoded and mapped cleanly.
///
/// Runs before the 200 is sent; an error here turns into an error response.
#[async_trait]
pub trait MessageSink: Send + Sync {
    fn name(&self) -> &'static str;
    async fn accept(&self, msg: &Message) -> Result<()>;
}

/// Logs each field of the message at info level.
#[derive(Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessageSink for TracingSink {
    fn name(&self) -> &'static str {
        "tracing"
    }

    async fn accept(&self, msg: &Message) -> Result<()> {
        tracing::info!(
            imei = msg.imei,
            serial = msg.serial,
            momsn = msg.momsn,
            transmit_time = %msg.transmit_time,
            latitude = msg.latitude,
            longitude = msg.longitude,
            accuracy_km = msg.accuracy_km,
            data = %msg.data,
            "iridium message received"
        );
        Ok(())
    }
}
