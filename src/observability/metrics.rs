use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub swipes_total: IntCounterVec,
    pub bookings_total: IntCounterVec,
    pub email_deliveries_total: IntCounterVec,
    pub chat_messages_total: IntCounter,
    pub active_conversations: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let swipes_total = IntCounterVec::new(
            Opts::new("swipes_total", "Total settled swipes by direction"),
            &["direction"],
        )
        .expect("valid swipes_total metric");

        let bookings_total = IntCounterVec::new(
            Opts::new("bookings_total", "Total booking confirmations by outcome"),
            &["outcome"],
        )
        .expect("valid bookings_total metric");

        let email_deliveries_total = IntCounterVec::new(
            Opts::new(
                "email_deliveries_total",
                "Total confirmation email attempts by outcome",
            ),
            &["outcome"],
        )
        .expect("valid email_deliveries_total metric");

        let chat_messages_total =
            IntCounter::new("chat_messages_total", "Total chat messages accepted")
                .expect("valid chat_messages_total metric");

        let active_conversations = IntGauge::new(
            "active_conversations",
            "Currently open conversation websockets",
        )
        .expect("valid active_conversations metric");

        registry
            .register(Box::new(swipes_total.clone()))
            .expect("register swipes_total");
        registry
            .register(Box::new(bookings_total.clone()))
            .expect("register bookings_total");
        registry
            .register(Box::new(email_deliveries_total.clone()))
            .expect("register email_deliveries_total");
        registry
            .register(Box::new(chat_messages_total.clone()))
            .expect("register chat_messages_total");
        registry
            .register(Box::new(active_conversations.clone()))
            .expect("register active_conversations");

        Self {
            registry,
            swipes_total,
            bookings_total,
            email_deliveries_total,
            chat_messages_total,
            active_conversations,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
