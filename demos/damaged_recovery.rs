//! Example demonstrating recovery from damaged data

use linkframe_core::{
    constants::CRC32_GENERATOR, decoder::FrameDecoder, encoder::FrameEncoder,
    integrity::IntegrityScheme, scanner::scan_stream_with_stats, types::DecodeOutcome, Sender,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Linkframe Damaged Data Recovery Example\n");

    let scheme = IntegrityScheme::crc(CRC32_GENERATOR)?;

    // Step 1: Frame ten short readings
    println!("Step 1: Framing 10 readings...");
    let mut sender = Sender::new(FrameEncoder::new(scheme), Vec::<u8>::new());
    for i in 1..=10 {
        sender.send(format!("sensor{i:02}").as_bytes())?;
    }
    let frames_sent = sender.frames_sent();
    let mut stream = sender.into_link();
    println!("Created clean stream: {} bytes, {} frames\n", stream.len(), frames_sent);

    // Step 2: Simulate damage
    println!("Step 2: Simulating damage...");

    stream[20] ^= 0x04;
    println!("Flipped one bit at byte 20");

    if stream.len() > 90 {
        stream[70..90].fill(0xFF);
        println!("Overwrote bytes 70-90");
    }

    if stream.len() > 150 {
        stream.drain(140..150);
        println!("Deleted bytes 140-150");
    }

    println!("Damaged stream: {} bytes\n", stream.len());

    // Step 3: Scan and recover
    println!("Step 3: Scanning damaged stream...");
    let (outcomes, stats) = scan_stream_with_stats(&FrameDecoder::new(scheme), &stream);

    println!("Scan Results:");
    println!("  Bytes scanned:        {}", stats.bytes_scanned);
    println!("  Valid frames:         {}", stats.frames_found);
    println!("  Integrity failures:   {}", stats.integrity_failures);
    println!("  Corrupted delimiters: {}", stats.corrupted_delimiters);
    println!("  Bytes pending:        {}", stats.bytes_pending);
    println!("  Recovery rate:        {:.1}%\n", stats.recovery_rate());

    println!("Outcomes in stream order:");
    for outcome in &outcomes {
        match outcome {
            DecodeOutcome::Frame(payload) => {
                println!("  ok     {}", String::from_utf8_lossy(payload))
            }
            DecodeOutcome::Error(err) => println!("  reject {err}"),
            DecodeOutcome::NoFrame => {}
        }
    }

    println!(
        "\n✓ Recovered {}/{} frames, no damaged payload was delivered",
        stats.frames_found, frames_sent
    );

    Ok(())
}
