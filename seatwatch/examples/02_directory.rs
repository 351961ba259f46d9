mod common;
use seatwatch::SeatWatch;
use common::get_connector;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sw = SeatWatch::builder().with_connector(get_connector()).build()?;

    for f in sw.facilities().await? {
        println!("{:>4}  {}", f.id, f.name);
        for a in &f.areas {
            println!("        {} {}-{}", a.name, a.opening.format("%H:%M"), a.closing.format("%H:%M"));
        }
    }

    Ok(())
}
