use switchyard::audit::{self, ActionCategory, AuditConfig, AuditEntry, AuditFormat, Severity};
use switchyard::{
    loader, Machine, MachineConfig, MachineStatus, Network, NetworkConfig, Pipeline, Word,
    DEFAULT_MONITOR_ADDRESS,
};
use std::env;
use std::process;
use std::time::Instant;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: switchyard <program.txt> [options]");
        println!();
        println!("Options:");
        println!("  --input a,b,...     Initial input values for a single machine run");
        println!("  --peek <addr>       Print the given memory cell after the run");
        println!("  --pipeline p,p,...  Feedback pipeline with the given phase values");
        println!("  --once              Single non-feedback pipeline pass");
        println!("  --signal <n>        Initial pipeline signal (default: 0)");
        println!("  --network <n>       Packet network of n machines");
        println!("  --first-monitor     Stop at the first monitor packet");
        println!("  --monitor <addr>    Monitor address (default: {})", DEFAULT_MONITOR_ADDRESS);
        println!("  --max-steps <n>     Step ceiling per run call (default: 10000000)");
        println!("  --audit [file]      Enable audit logging (default: switchyard-audit.log)");
        println!("  --audit-json        Use JSON Lines format for audit output");
        return;
    }

    let filename = &args[1];
    let once = args.contains(&"--once".to_string());
    let first_monitor = args.contains(&"--first-monitor".to_string());

    // Parse max_steps: --max-steps <u64>
    let mut max_steps: u64 = 10_000_000;
    if let Some(idx) = args.iter().position(|a| a == "--max-steps") {
        if idx + 1 < args.len() {
            max_steps = args[idx + 1].parse().unwrap_or(10_000_000);
        }
    }

    // Parse monitor address: --monitor <word>
    let mut monitor_address: Word = DEFAULT_MONITOR_ADDRESS;
    if let Some(idx) = args.iter().position(|a| a == "--monitor") {
        if idx + 1 < args.len() {
            monitor_address = args[idx + 1].parse().unwrap_or(DEFAULT_MONITOR_ADDRESS);
        }
    }

    // Parse signal: --signal <word>
    let mut signal: Word = 0;
    if let Some(idx) = args.iter().position(|a| a == "--signal") {
        if idx + 1 < args.len() {
            signal = args[idx + 1].parse().unwrap_or(0);
        }
    }

    // Parse audit options
    let audit_json = args.contains(&"--audit-json".to_string());
    if let Some(idx) = args.iter().position(|a| a == "--audit") {
        let audit_path = if idx + 1 < args.len() && !args[idx + 1].starts_with('-') {
            args[idx + 1].clone()
        } else {
            "switchyard-audit.log".to_string()
        };

        let config = AuditConfig {
            log_path: std::path::PathBuf::from(&audit_path),
            min_severity: Severity::Info,
            echo_stdout: false,
            format: if audit_json { AuditFormat::JsonLines } else { AuditFormat::Text },
        };

        if let Err(e) = audit::init_global_logger(config) {
            eprintln!("Warning: Could not initialize audit logger: {}", e);
        }
    }

    let image = match loader::load_image(filename) {
        Ok(image) => image,
        Err(e) => {
            audit::audit_error("LOAD", "Program", filename, &e.to_string());
            eprintln!("Load error: {}", e);
            process::exit(1);
        }
    };

    audit::audit(
        AuditEntry::new("LOAD", "Program", filename, "Image loaded")
            .with_category(ActionCategory::Load)
            .with_meta("words", image.len().to_string()),
    );

    let machine_config = MachineConfig { max_steps, ..Default::default() };

    // Pipeline mode
    if let Some(idx) = args.iter().position(|a| a == "--pipeline") {
        let phases = match args.get(idx + 1).map(|s| loader::parse_image(s)) {
            Some(Ok(phases)) => phases,
            _ => {
                eprintln!("--pipeline requires a comma-separated phase list");
                process::exit(1);
            }
        };

        let start = Instant::now();
        let mut pipeline = Pipeline::with_config(&image, &phases, machine_config);
        let result = if once { pipeline.run_once(signal) } else { pipeline.run(signal) };

        match result {
            Ok(answer) => {
                audit::audit(
                    AuditEntry::new("RUN", "Pipeline", filename, "Pipeline drained")
                        .with_category(ActionCategory::Pipeline)
                        .with_duration_us(start.elapsed().as_micros() as u64)
                        .with_meta("machines", phases.len().to_string())
                        .with_meta("answer", answer.to_string()),
                );
                println!("{}", answer);
            }
            Err(e) => {
                eprintln!("Pipeline error: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    // Network mode
    if let Some(idx) = args.iter().position(|a| a == "--network") {
        let n: usize = match args.get(idx + 1).map(|s| s.parse()) {
            Some(Ok(n)) => n,
            _ => {
                eprintln!("--network requires a machine count");
                process::exit(1);
            }
        };

        let config = NetworkConfig { monitor_address, machine: machine_config };
        let start = Instant::now();
        let mut network = Network::with_config(&image, n, config);
        let result = if first_monitor {
            network.run_until_monitor()
        } else {
            network.run_until_idle_repeat()
        };

        match result {
            Ok(answer) => {
                audit::audit(
                    AuditEntry::new("RUN", "Network", filename, "Network terminated")
                        .with_category(ActionCategory::Network)
                        .with_duration_us(start.elapsed().as_micros() as u64)
                        .with_meta("machines", n.to_string())
                        .with_meta("rounds", network.rounds().to_string())
                        .with_meta("answer", answer.to_string()),
                );
                println!("{}", answer);
            }
            Err(e) => {
                eprintln!("Network error: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    // Single machine run
    let mut inputs = Vec::new();
    if let Some(idx) = args.iter().position(|a| a == "--input") {
        match args.get(idx + 1).map(|s| loader::parse_image(s)) {
            Some(Ok(values)) => inputs = values,
            _ => {
                eprintln!("--input requires a comma-separated value list");
                process::exit(1);
            }
        }
    }

    let start = Instant::now();
    let mut machine = Machine::with_config(&image, &inputs, machine_config);
    match machine.run() {
        Ok(result) => {
            audit::audit(
                AuditEntry::new("RUN", "Machine", filename, "Run complete")
                    .with_category(ActionCategory::Execute)
                    .with_duration_us(start.elapsed().as_micros() as u64)
                    .with_meta("steps", result.steps.to_string())
                    .with_meta("outputs", result.outputs.len().to_string()),
            );

            if result.status == MachineStatus::BlockedOnInput {
                eprintln!("Machine blocked on input after {} steps", result.steps);
            }
            for value in &result.outputs {
                println!("{}", value);
            }

            if let Some(idx) = args.iter().position(|a| a == "--peek") {
                if let Some(Ok(addr)) = args.get(idx + 1).map(|s| s.parse::<Word>()) {
                    match machine.peek(addr) {
                        Ok(value) => println!("[{}] = {}", addr, value),
                        Err(e) => eprintln!("Peek error: {}", e),
                    }
                }
            }
        }
        Err(e) => {
            audit::audit_error("RUN", "Machine", filename, &e.to_string());
            eprintln!("Machine error: {}", e);
            process::exit(1);
        }
    }
}
