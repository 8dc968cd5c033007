//! Basic encoding example

use linkframe_core::LinkConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Linkframe Basic Encoding Example\n");

    let config = LinkConfig::default();
    let mut sender = config.sender(Vec::<u8>::new())?;

    // Each reading is split into frames of at most eight payload bytes
    for i in 1..=5 {
        let reading = format!("sensor {i}: {{temp: {}}}", 20 + i);
        let frames = sender.send(reading.as_bytes())?;
        println!("Reading {}: {} bytes in {} frames", i, reading.len(), frames);
    }

    let output = sender.into_link();
    std::fs::write("example_output.lf", &output)?;

    println!("\nWrote {} bytes to example_output.lf", output.len());
    println!("Use 'linkframe unpack --input example_output.lf' to read it back");

    Ok(())
}
