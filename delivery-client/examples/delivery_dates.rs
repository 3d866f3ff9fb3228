//! Delivery date lookup example
//!
//! Fetches the deployment's delivery-data document, resolves an address to
//! a region, and prints the selectable dates and hour slots.
//!
//! Run: DELIVERY_DATA_URL=https://.../delivery.json \
//!      cargo run --example delivery_dates -- "newtown nsw 2042"

use chrono::Local;
use delivery_client::{
    Availability, ClientConfig, DeliveryController, MemoryAttributeStore, ScheduleClient,
};
use schedule_core::models::format_delivery_day;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let address = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "newtown nsw 2042".to_string());

    let config = ClientConfig::from_env()?;
    let client = ScheduleClient::new(config.clone());
    let mut controller = DeliveryController::new(config, MemoryAttributeStore::new());
    controller.load(&client).await?;

    if !controller.select_address(&address)? {
        println!("No delivery region serves '{address}'");
        return Ok(());
    }
    let location = controller.location().expect("location was just selected");
    println!("Region: {}\n", location.region);

    let now = Local::now().fixed_offset();
    match controller.delivery_dates(now)? {
        Availability::Available(dates) => {
            let window = controller.delivery_window(now)?;
            if let Some(special) = window.special_day() {
                println!("Expedited: {special:?}");
            }
            for date in &dates {
                println!("{}", format_delivery_day(*date));
                for slot in controller.hour_slots(*date)? {
                    println!("    {} {}", slot.title, slot.help_text);
                }
            }
        }
        Availability::NotAvailable => println!("Delivery is not available"),
    }

    Ok(())
}
