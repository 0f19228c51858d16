use crate::config::Config;
use crate::error::{DbError, Result};
use crate::index::{BalancedIndex, TraversalOrder};
use crate::metrics::{Metrics, Operation};
use crate::record::{FieldLimits, Profile, ProfileId, Sex};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "profiledb")]
#[command(about = "In-memory profile database backed by a height-balanced index", long_about = None)]
pub struct Command {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive menu (default when no command is given)
    Shell,

    /// Write a configuration file
    Init {
        /// Configuration file path
        #[arg(short, long)]
        path: PathBuf,

        /// Maximum name length in characters
        #[arg(long, default_value = "99")]
        name_max_len: usize,

        /// Maximum contact length in characters
        #[arg(long, default_value = "14")]
        contact_max_len: usize,

        /// Check index structure after every insert and delete
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Log level used when RUST_LOG is unset
        #[arg(long, default_value = "warn")]
        log_level: String,
    },

    /// Run benchmark
    Bench {
        /// Number of profiles to pre-populate
        #[arg(short, long, default_value = "100000")]
        keys: u32,

        /// Read percentage (0-100)
        #[arg(short, long, default_value = "70")]
        read_pct: u8,

        /// Write percentage (0-100)
        #[arg(short, long, default_value = "30")]
        write_pct: u8,

        /// Number of mixed operations after population
        #[arg(short, long, default_value = "1000000")]
        operations: u64,

        /// Seed for the operation mix
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

pub fn execute_command(cmd: Command, config: Config) -> Result<()> {
    match cmd.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = io::stdin();
            let mut shell = Shell::new(config, stdin.lock(), io::stdout().lock());
            shell.run()
        }
        Commands::Init { path, name_max_len, contact_max_len, verify, log_level } => {
            execute_init_command(&path, name_max_len, contact_max_len, verify, log_level)
        }
        Commands::Bench { keys, read_pct, write_pct, operations, seed } => {
            execute_bench_command(
                keys,
                read_pct,
                write_pct,
                operations,
                seed,
                &config,
                &mut io::stdout().lock(),
            )
        }
    }
}

/// Load configuration from `path`, or defaults when no path is given
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(config_path) = path else {
        return Ok(Config::default());
    };

    if config_path.exists() {
        let config_json = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_json)?;
        config.validate()?;
        Ok(config)
    } else {
        Err(DbError::ConfigError(format!(
            "Configuration file not found at {}. Run 'profiledb init --path {}' first.",
            config_path.display(),
            config_path.display()
        )))
    }
}

fn execute_init_command(
    path: &Path,
    name_max_len: usize,
    contact_max_len: usize,
    verify: bool,
    log_level: String,
) -> Result<()> {
    let config = Config::new()
        .with_name_max_len(name_max_len)
        .with_contact_max_len(contact_max_len)
        .with_verify_after_mutation(verify)
        .with_log_level(log_level);

    // Validate configuration
    config.validate()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let config_json = serde_json::to_string_pretty(&config)?;
    std::fs::write(path, config_json)?;
    info!(path = %path.display(), "configuration written");

    println!("✓ Created configuration file: {}", path.display());
    println!("\nConfiguration:");
    println!("  Name limit: {} characters", config.name_max_len);
    println!("  Contact limit: {} characters", config.contact_max_len);
    println!("  Verify after mutation: {}", if verify { "enabled" } else { "disabled" });
    println!("  Log level: {}", config.log_level);

    Ok(())
}

fn bench_profile(id: ProfileId) -> Profile {
    let sex = if id % 2 == 0 { Sex::Female } else { Sex::Male };
    Profile::new(id, format!("bench_user_{:010}", id), 18 + (id % 60) as i32, sex, "555-0000")
}

pub fn execute_bench_command<W: Write>(
    keys: u32,
    read_pct: u8,
    write_pct: u8,
    operations: u64,
    seed: u64,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    // Validate percentages
    if u16::from(read_pct) + u16::from(write_pct) != 100 {
        return Err(DbError::ConfigError(format!(
            "Read and write percentages must sum to 100 (got {})",
            u16::from(read_pct) + u16::from(write_pct)
        )));
    }
    if keys == 0 {
        return Err(DbError::ConfigError("keys must be at least 1".to_string()));
    }

    writeln!(out, "=== profiledb Benchmark ===")?;
    writeln!(out, "Configuration:")?;
    writeln!(out, "  Total keys: {}", keys)?;
    writeln!(out, "  Read percentage: {}%", read_pct)?;
    writeln!(out, "  Write percentage: {}%", write_pct)?;
    writeln!(out, "  Operations: {}", operations)?;
    writeln!(out, "  Seed: {}", seed)?;
    writeln!(out)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut metrics = Metrics::new()?;
    let mut index = BalancedIndex::new();
    let key_space = ProfileId::from(keys);

    writeln!(out, "Populating initial data...")?;

    let mut ids: Vec<ProfileId> = (0..key_space).collect();
    ids.shuffle(&mut rng);
    for id in ids {
        let profile = bench_profile(id);
        let start = Instant::now();
        let result = index.insert(profile);
        metrics.record_latency(Operation::Insert, start.elapsed());
        result?;
    }
    index.verify()?;

    writeln!(out, "✓ Populated {} profiles (height {})\n", index.len(), index.height())?;
    writeln!(out, "Running benchmark...")?;

    let start_time = Instant::now();
    let mut read_count = 0u64;
    let mut write_count = 0u64;

    for _ in 0..operations {
        let id = rng.gen_range(0..key_space);

        if rng.gen_range(0..100u8) < read_pct {
            let start = Instant::now();
            let found = index.search(id).is_some();
            metrics.record_latency(Operation::Search, start.elapsed());
            if !found {
                metrics.increment_missed_lookups();
            }
            read_count += 1;
        } else {
            if rng.gen_bool(0.5) {
                let profile = bench_profile(id);
                let start = Instant::now();
                let result = index.insert(profile);
                metrics.record_latency(Operation::Insert, start.elapsed());
                match result {
                    Ok(()) => {}
                    Err(DbError::DuplicateKey { .. }) => metrics.increment_rejected_inserts(),
                    Err(err) => return Err(err),
                }
            } else {
                let start = Instant::now();
                let removed = index.delete(id);
                metrics.record_latency(Operation::Delete, start.elapsed());
                if removed.is_none() {
                    metrics.increment_noop_deletes();
                }
            }
            if config.verify_after_mutation {
                index.verify()?;
            }
            write_count += 1;
        }
    }

    let start = Instant::now();
    let visited = index.iter().count();
    metrics.record_latency(Operation::Traverse, start.elapsed());
    debug!(visited, "in-order traversal finished");

    index.verify()?;

    writeln!(out, "\n=== Benchmark Results ===")?;

    let elapsed = start_time.elapsed().as_secs_f64();
    let mixed = read_count + write_count;
    let throughput = if elapsed > 0.0 { mixed as f64 / elapsed } else { 0.0 };
    let pct = |count: u64| if mixed > 0 { count as f64 / mixed as f64 * 100.0 } else { 0.0 };

    writeln!(out, "Duration: {:.2} seconds", elapsed)?;
    writeln!(out, "Total operations: {}", mixed)?;
    writeln!(out, "  Reads: {} ({:.1}%)", read_count, pct(read_count))?;
    writeln!(out, "  Writes: {} ({:.1}%)", write_count, pct(write_count))?;
    writeln!(out, "Throughput: {:.0} ops/sec", throughput)?;
    writeln!(out)?;

    let report = metrics.report();

    writeln!(out, "Latency Percentiles (nanoseconds):")?;
    for (operation, samples, (p50, p95, p99)) in &report.operation_latencies {
        writeln!(out, "  {} ({} samples):", operation, samples)?;
        writeln!(out, "    p50: {:.0} ns", p50)?;
        writeln!(out, "    p95: {:.0} ns", p95)?;
        writeln!(out, "    p99: {:.0} ns", p99)?;
    }
    writeln!(out)?;

    let bound = 1.44 * ((index.len() + 2) as f64).log2();
    writeln!(out, "Index:")?;
    writeln!(out, "  Profiles: {}", index.len())?;
    writeln!(out, "  Height: {} (AVL bound {:.2})", index.height(), bound)?;
    writeln!(out, "  Rejected inserts: {}", report.rejected_inserts)?;
    writeln!(out, "  Missed lookups: {}", report.missed_lookups)?;
    writeln!(out, "  No-op deletes: {}", report.noop_deletes)?;

    info!(profiles = index.len(), height = index.height(), "benchmark finished");
    Ok(())
}

const MENU: &str = "\nProfile Database Operations:
1. Add Profile
2. Delete Profile
3. Search Profile
4. Preorder Traversal
5. Inorder Traversal
6. Postorder Traversal
7. Exit
Enter your choice: ";

/// Entry of the interactive menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Delete,
    Search,
    PreOrder,
    InOrder,
    PostOrder,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u32>().ok()? {
            1 => Some(MenuChoice::Add),
            2 => Some(MenuChoice::Delete),
            3 => Some(MenuChoice::Search),
            4 => Some(MenuChoice::PreOrder),
            5 => Some(MenuChoice::InOrder),
            6 => Some(MenuChoice::PostOrder),
            7 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| DbError::InvalidField {
        field,
        reason: format!("expected an integer, got {:?}", raw.trim()),
    })
}

fn parse_profile(
    id: &str,
    name: &str,
    age: &str,
    sex: &str,
    contact: &str,
    limits: &FieldLimits,
) -> Result<Profile> {
    let id = parse_number::<ProfileId>("ID", id)?;
    let age = parse_number::<i32>("age", age)?;
    let sex = sex.parse::<Sex>()?;
    Profile::validated(id, name.trim(), age, sex, contact.trim(), limits)
}

/// Menu-driven front end over a [`BalancedIndex`].
///
/// Reads answers line by line from `input` and writes prompts and results
/// to `output`. Running out of input ends the session like choosing Exit.
pub struct Shell<R, W> {
    index: BalancedIndex,
    config: Config,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(config: Config, input: R, output: W) -> Self {
        Self {
            index: BalancedIndex::new(),
            config,
            input,
            output,
        }
    }

    pub fn index(&self) -> &BalancedIndex {
        &self.index
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run(&mut self) -> Result<()> {
        info!("shell started");
        loop {
            write!(self.output, "{}", MENU)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output, "\nExiting...")?;
                break;
            };
            match MenuChoice::parse(&line) {
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "Exiting...")?;
                    break;
                }
                Some(choice) => self.dispatch(choice)?,
                None => {
                    debug!(input = %line, "unrecognised menu choice");
                    writeln!(self.output, "Invalid choice, please try again.")?;
                }
            }
        }
        self.output.flush()?;
        info!(profiles = self.index.len(), "shell finished");
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::Add => self.add_profile(),
            MenuChoice::Delete => self.delete_profile(),
            MenuChoice::Search => self.search_profile(),
            MenuChoice::PreOrder => self.list("Preorder Traversal:", TraversalOrder::PreOrder),
            MenuChoice::InOrder => self.list("Inorder Traversal:", TraversalOrder::InOrder),
            MenuChoice::PostOrder => self.list("Postorder Traversal:", TraversalOrder::PostOrder),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn add_profile(&mut self) -> Result<()> {
        let Some(id) = self.prompt("Enter the Profile ID:")? else { return Ok(()) };
        let Some(name) = self.prompt("Enter the Profile Name:")? else { return Ok(()) };
        let Some(age) = self.prompt("Enter the Profile Age:")? else { return Ok(()) };
        let Some(sex) = self.prompt("Enter the Profile Gender (M/F):")? else { return Ok(()) };
        let Some(contact) = self.prompt("Enter the Contact Number:")? else { return Ok(()) };

        let limits = self.config.field_limits();
        let profile = match parse_profile(&id, &name, &age, &sex, &contact, &limits) {
            Ok(profile) => profile,
            Err(err) => {
                warn!(%err, "profile input rejected");
                writeln!(self.output, "{}", err)?;
                return Ok(());
            }
        };

        match self.index.insert(profile) {
            Ok(()) => writeln!(self.output, "Profile added successfully!")?,
            Err(err @ DbError::DuplicateKey { .. }) => writeln!(self.output, "{}", err)?,
            Err(err) => return Err(err),
        }
        self.verify_if_enabled()
    }

    fn delete_profile(&mut self) -> Result<()> {
        let Some(id) = self.prompt_id("Enter the Profile ID to delete:")? else { return Ok(()) };

        match self.index.delete(id) {
            Some(_) => writeln!(self.output, "Profile deleted successfully!")?,
            None => writeln!(self.output, "Profile with ID {} not found.", id)?,
        }
        self.verify_if_enabled()
    }

    fn search_profile(&mut self) -> Result<()> {
        let Some(id) = self.prompt_id("Enter the Profile ID to search:")? else { return Ok(()) };

        match self.index.search(id) {
            Some(profile) => {
                writeln!(self.output, "Profile Found:")?;
                writeln!(self.output, "{}", profile)?;
            }
            None => writeln!(self.output, "Profile with ID {} not found.", id)?,
        }
        Ok(())
    }

    fn list(&mut self, header: &str, order: TraversalOrder) -> Result<()> {
        writeln!(self.output, "{}", header)?;
        for profile in self.index.traverse(order) {
            writeln!(self.output, "{}", profile)?;
        }
        Ok(())
    }

    fn verify_if_enabled(&self) -> Result<()> {
        if self.config.verify_after_mutation {
            self.index.verify()?;
            debug!(profiles = self.index.len(), "index verified");
        }
        Ok(())
    }

    /// Prompt for an id; bad input is reported and yields `None`
    fn prompt_id(&mut self, message: &str) -> Result<Option<ProfileId>> {
        let Some(raw) = self.prompt(message)? else { return Ok(None) };
        match parse_number::<ProfileId>("ID", &raw) {
            Ok(id) => Ok(Some(id)),
            Err(err) => {
                writeln!(self.output, "{}", err)?;
                Ok(None)
            }
        }
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Read one line without its terminator.
    ///
    /// A line that is not valid UTF-8 is reported and comes back empty, which
    /// every menu choice and field parser rejects.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        match String::from_utf8(buf) {
            Ok(line) => Ok(Some(line.trim_end_matches(&['\n', '\r'][..]).to_string())),
            Err(_) => {
                let err = DbError::InvalidField {
                    field: "input",
                    reason: "line is not valid UTF-8".to_string(),
                };
                warn!(%err, "input line rejected");
                writeln!(self.output, "{}", err)?;
                Ok(Some(String::new()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_script(config: Config, script: &str) -> (usize, String) {
        run_bytes(config, script.as_bytes())
    }

    fn run_bytes(config: Config, script: &[u8]) -> (usize, String) {
        let mut shell = Shell::new(config, Cursor::new(script), Vec::new());
        shell.run().unwrap();
        let len = shell.index().len();
        (len, String::from_utf8(shell.into_output()).unwrap())
    }

    fn add(id: ProfileId, name: &str) -> String {
        format!("1\n{}\n{}\n30\nF\n555-1234\n", id, name)
    }

    fn listed_ids(output: &str, header: &str) -> Vec<String> {
        output
            .split(header)
            .nth(1)
            .unwrap()
            .lines()
            .skip(1)
            .take_while(|line| line.starts_with("ID: "))
            .map(|line| line.split(',').next().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_add_and_search() {
        let script = format!("{}3\n10\n7\n", add(10, "Alice"));
        let (len, output) = run_script(Config::new(), &script);

        assert_eq!(len, 1);
        assert!(output.contains("Profile added successfully!"));
        assert!(output.contains("Profile Found:"));
        assert!(output.contains("ID: 10, Name: Alice, Age: 30, Gender: F, Contact: 555-1234"));
        assert!(output.trim_end().ends_with("Exiting..."));
    }

    #[test]
    fn test_duplicate_add_keeps_original() {
        let script = format!("{}{}3\n10\n7\n", add(10, "Alice"), add(10, "Mallory"));
        let (len, output) = run_script(Config::new(), &script);

        assert_eq!(len, 1);
        assert!(output.contains("Profile with ID 10 already exists"));
        assert!(output.contains("Name: Alice"));
        assert!(!output.contains("Name: Mallory"));
    }

    #[test]
    fn test_invalid_fields_are_rejected() {
        let script = "1\n10\nAlice\n30\nX\n555\n\
                      1\nabc\nAlice\n30\nF\n555\n\
                      1\n11\nAlice\nold\nF\n555\n\
                      1\n12\nAlice\n30\nF\n123456789012345\n7\n";
        let (len, output) = run_script(Config::new(), script);

        assert_eq!(len, 0);
        assert!(output.contains("Invalid sex"));
        assert!(output.contains("Invalid ID"));
        assert!(output.contains("Invalid age"));
        assert!(output.contains("Invalid contact"));
        assert!(!output.contains("Invalid choice"));
    }

    #[test]
    fn test_contact_limit_from_config() {
        let config = Config::new().with_contact_max_len(20);
        let script = "1\n12\nAlice\n30\nF\n123456789012345\n7\n";
        let (len, _) = run_script(config, script);
        assert_eq!(len, 1);
    }

    #[test]
    fn test_delete_existing_and_missing() {
        let script = format!("{}2\n10\n2\n10\n7\n", add(10, "Alice"));
        let (len, output) = run_script(Config::new(), &script);

        assert_eq!(len, 0);
        assert!(output.contains("Profile deleted successfully!"));
        assert!(output.contains("Profile with ID 10 not found."));
    }

    #[test]
    fn test_non_utf8_line_keeps_session_alive() {
        let mut script = add(10, "Alice").into_bytes();
        script.extend_from_slice(b"1\n11\nBj\xF6rn\n30\nM\n555\n");
        script.extend_from_slice(b"3\n10\n\xFF\n7\n");
        let (len, output) = run_bytes(Config::new(), &script);

        assert_eq!(len, 1);
        assert_eq!(output.matches("Invalid input: line is not valid UTF-8").count(), 2);
        assert!(output.contains("Invalid name"));
        assert!(output.contains("ID: 10, Name: Alice"));
        assert!(output.contains("Invalid choice, please try again."));
        assert!(output.trim_end().ends_with("Exiting..."));
    }

    #[test]
    fn test_search_missing() {
        let (_, output) = run_script(Config::new(), "3\n5\n7\n");
        assert!(output.contains("Profile with ID 5 not found."));
    }

    #[test]
    fn test_traversal_listings() {
        let script = format!(
            "{}{}{}4\n5\n6\n7\n",
            add(10, "A"),
            add(20, "B"),
            add(30, "C")
        );
        let (_, output) = run_script(Config::new(), &script);

        assert_eq!(listed_ids(&output, "Preorder Traversal:"), ["ID: 20", "ID: 10", "ID: 30"]);
        assert_eq!(listed_ids(&output, "Inorder Traversal:"), ["ID: 10", "ID: 20", "ID: 30"]);
        assert_eq!(listed_ids(&output, "Postorder Traversal:"), ["ID: 10", "ID: 30", "ID: 20"]);
    }

    #[test]
    fn test_invalid_menu_choice() {
        let (_, output) = run_script(Config::new(), "9\nabc\n\n7\n");
        assert_eq!(output.matches("Invalid choice, please try again.").count(), 3);
    }

    #[test]
    fn test_end_of_input_exits() {
        let (len, output) = run_script(Config::new(), &add(1, "Alice"));
        assert_eq!(len, 1);
        assert!(output.trim_end().ends_with("Exiting..."));

        // Input ends halfway through an add
        let (len, _) = run_script(Config::new(), "1\n2\nBob\n");
        assert_eq!(len, 0);
    }

    #[test]
    fn test_verify_after_mutation() {
        let config = Config::new().with_verify_after_mutation(true);
        let mut script = String::new();
        for id in 1..=20 {
            script.push_str(&add(id, "User"));
        }
        for id in (1..=20).step_by(3) {
            script.push_str(&format!("2\n{}\n", id));
        }
        let (len, _) = run_script(config, &script);
        assert_eq!(len, 13);
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse(" 5 "), Some(MenuChoice::InOrder));
        assert_eq!(MenuChoice::parse("7"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("-1"), None);
        assert_eq!(MenuChoice::parse("add"), None);
    }

    #[test]
    fn test_init_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("conf").join("profiledb.json");

        let result = execute_init_command(&path, 50, 20, true, "info".to_string());
        assert!(result.is_ok());
        assert!(path.exists());

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.name_max_len, 50);
        assert_eq!(config.contact_max_len, 20);
        assert!(config.verify_after_mutation);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_init_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profiledb.json");

        let result = execute_init_command(&path, 0, 14, false, "warn".to_string());
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_load_config_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");
        assert!(matches!(load_config(Some(path.as_path())), Err(DbError::ConfigError(_))));
        assert_eq!(load_config(None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, r#"{"contact_max_len": 0}"#).unwrap();
        assert!(load_config(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_bench_command() {
        let mut out = Vec::new();
        let config = Config::new().with_verify_after_mutation(true);
        let result = execute_bench_command(200, 50, 50, 2000, 7, &config, &mut out);
        assert!(result.is_ok());

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("=== Benchmark Results ==="));
        assert!(output.contains("Total operations: 2000"));
        assert!(output.contains("traverse (1 samples)"));
    }

    #[test]
    fn test_bench_command_validation() {
        let mut out = Vec::new();
        let config = Config::new();
        assert!(execute_bench_command(100, 50, 30, 10, 1, &config, &mut out).is_err());
        assert!(execute_bench_command(0, 70, 30, 10, 1, &config, &mut out).is_err());
    }

    #[test]
    fn test_command_parsing() {
        let cmd = Command::try_parse_from(["profiledb"]).unwrap();
        assert!(cmd.command.is_none());

        let cmd = Command::try_parse_from(["profiledb", "--config", "/tmp/p.json", "shell"]).unwrap();
        assert_eq!(cmd.config, Some(PathBuf::from("/tmp/p.json")));
        assert!(matches!(cmd.command, Some(Commands::Shell)));

        let args = ["profiledb", "init", "--path", "/tmp/p.json", "--name-max-len", "50", "--verify"];
        assert!(Command::try_parse_from(args).is_ok());

        let args = ["profiledb", "bench", "--keys", "1000", "--read-pct", "70", "--write-pct", "30", "--operations", "10"];
        assert!(Command::try_parse_from(args).is_ok());

        let args = ["profiledb", "bench", "--keys", "-5"];
        assert!(Command::try_parse_from(args).is_err());
    }
}
