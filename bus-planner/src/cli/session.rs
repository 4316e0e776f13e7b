//! Command execution against an owned network.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::{Fare, Route, RouteNum, Terminal, TerminalName, TravelTime};
use crate::planner::{PlanRequest, Planner, PlannerConfig};
use crate::schedule::{self, ScheduleConfig};
use crate::store::Network;

use super::script::read_script;
use super::{Command, HELP, rejection};

/// An interactive session: the network plus the settings commands run with.
#[derive(Debug)]
pub struct Session {
    network: Network,
    schedule_config: ScheduleConfig,
    planner_config: PlannerConfig,
    /// Snapshot rewritten after every successful mutation.
    snapshot: Option<PathBuf>,
    /// Nesting depth of `run` commands currently executing.
    script_depth: usize,
    finished: bool,
}

impl Session {
    /// Create a session over an existing network.
    pub fn new(
        network: Network,
        schedule_config: ScheduleConfig,
        planner_config: PlannerConfig,
    ) -> Self {
        Self {
            network,
            schedule_config,
            planner_config,
            snapshot: None,
            script_depth: 0,
            finished: false,
        }
    }

    /// Persist the network to `path` after every successful change.
    pub fn with_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot = Some(path.into());
        self
    }

    /// The network as modified so far.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Returns true once `exit` has run.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Execute one input line and return the lines it prints.
    pub fn execute(&mut self, line: &str) -> Vec<String> {
        match Command::parse(line) {
            Ok(Some(command)) => self.run(command),
            Ok(None) => Vec::new(),
            Err(e) => {
                debug!(line, error = ?e, "command rejected");
                vec![e.to_string()]
            }
        }
    }

    /// Execute a command file as the `run` command would, returning
    /// everything it prints. `run` rows inside the file are rejected.
    pub fn run_file(&mut self, path: &Path) -> Vec<String> {
        self.run_script(path.display().to_string())
    }

    /// Execute a parsed command.
    pub fn run(&mut self, command: Command) -> Vec<String> {
        match command {
            Command::AddTerminal { name, district } => self.add_terminal(name, district),
            Command::AddRoute {
                num,
                source,
                destination,
                travel_time,
                fare,
            } => self.add_route([num, source, destination, travel_time, fare]),
            Command::AddDeparture { route, time } => self.add_departure(route, time),
            Command::TerminalInfo { name } => self.terminal_info(name),
            Command::RouteInfo { num } => self.route_info(num),
            Command::Districts => self.districts(),
            Command::FindRoutes {
                source,
                destination,
            } => self.find_routes(source, destination),
            Command::Plan {
                source,
                destination,
                time,
            } => self.plan(source, destination, time),
            Command::Clear => {
                self.network.clear();
                self.persist();
                vec!["Data cleared".to_string()]
            }
            Command::Run { path } => self.run_script(path),
            Command::Help => HELP.iter().map(|line| line.to_string()).collect(),
            Command::Exit => {
                self.finished = true;
                vec!["Exiting...".to_string()]
            }
        }
    }

    fn add_terminal(&mut self, name: String, district: String) -> Vec<String> {
        let result = TerminalName::parse(&name)
            .map_err(|e| e.to_string())
            .and_then(|n| Terminal::new(n, &district).map_err(|e| e.to_string()))
            .and_then(|t| self.network.add_terminal(t).map_err(|e| e.to_string()));

        self.mutation("t", &[name, district], result)
    }

    fn add_route(&mut self, args: [String; 5]) -> Vec<String> {
        let result = parse_route(&args)
            .and_then(|route| self.network.add_route(route).map_err(|e| e.to_string()));

        self.mutation("b", &args, result)
    }

    fn add_departure(&mut self, route: String, time: String) -> Vec<String> {
        let result =
            schedule::register_departure(&mut self.network, &route, &time, &self.schedule_config)
                .map(|_| ())
                .map_err(|e| e.to_string());

        self.mutation("l", &[route, time], result)
    }

    /// Silent on success; the rejection line on failure.
    fn mutation(&mut self, command: &str, args: &[String], result: Result<(), String>) -> Vec<String> {
        match result {
            Ok(()) => {
                self.persist();
                Vec::new()
            }
            Err(reason) => {
                debug!(command, ?args, %reason, "command rejected");
                vec![rejection(command, args)]
            }
        }
    }

    fn terminal_info(&self, name: String) -> Vec<String> {
        let summary = TerminalName::parse(&name)
            .ok()
            .and_then(|n| self.network.terminal_summary(&n));
        let Some(summary) = summary else {
            debug!(terminal = %name, "unknown terminal");
            return vec![rejection("T", &[name])];
        };

        let count_line = |routes: &[RouteNum]| {
            let list: Vec<String> = routes.iter().map(ToString::to_string).collect();
            format!("{} {}", routes.len(), list.join(", "))
                .trim_end()
                .to_string()
        };

        vec![
            format!("{} {}", summary.terminal.name, summary.terminal.district),
            count_line(&summary.departing),
            count_line(&summary.arriving),
        ]
    }

    fn route_info(&self, num: String) -> Vec<String> {
        let route = RouteNum::parse(&num)
            .ok()
            .and_then(|n| self.network.route(n));
        let Some(route) = route else {
            return vec![format!("Route '{num}' not found")];
        };

        let mut lines = vec![format!(
            "{} {} {} {} {}",
            route.num,
            route.source,
            route.destination,
            route.travel_time.minutes(),
            route.fare
        )];
        let times: Vec<String> = self
            .network
            .departures(route.num)
            .map(|t| t.to_string())
            .collect();
        if !times.is_empty() {
            lines.push(times.join(" "));
        }
        lines
    }

    fn districts(&self) -> Vec<String> {
        self.network
            .district_summaries()
            .into_iter()
            .map(|d| format!("{} {} {}", d.district, d.departing, d.arriving))
            .collect()
    }

    fn find_routes(&self, source: String, destination: String) -> Vec<String> {
        let names = TerminalName::parse(&source)
            .and_then(|s| TerminalName::parse(&destination).map(|d| (s, d)));
        let Ok((from, to)) = names else {
            return vec![rejection("C", &[source, destination])];
        };

        let planner = Planner::new(&self.network, &self.planner_config);
        match planner.find_routes(&from, &to) {
            Ok(options) if options.is_empty() => vec!["None".to_string()],
            Ok(options) => options.iter().map(ToString::to_string).collect(),
            Err(e) => {
                warn!(error = %e, "route lookup failed");
                vec![rejection("C", &[source, destination])]
            }
        }
    }

    fn plan(&self, source: String, destination: String, time: String) -> Vec<String> {
        let planner = Planner::new(&self.network, &self.planner_config);
        let result = PlanRequest::parse(&source, &destination, &time)
            .and_then(|request| planner.plan(&request));

        match result {
            Ok(found) if found.is_empty() => vec!["None".to_string()],
            Ok(found) => found.itineraries.iter().map(ToString::to_string).collect(),
            Err(e) => {
                debug!(error = %e, "plan rejected");
                vec![rejection("F", &[source, destination, time])]
            }
        }
    }

    fn run_script(&mut self, path: String) -> Vec<String> {
        if self.script_depth > 0 {
            debug!(%path, "nested run rejected");
            return vec![rejection("run", &[path])];
        }

        let lines = match read_script(&path) {
            Ok(lines) => lines,
            Err(e) => {
                warn!(%path, error = %e, "could not read command file");
                return vec![format!("Error running commands from file: {e}")];
            }
        };

        self.script_depth += 1;
        let mut output = Vec::new();
        for line in lines {
            output.extend(self.execute(&line));
            if self.finished {
                break;
            }
        }
        self.script_depth -= 1;
        output
    }

    /// Rewrite the snapshot, if one is configured.
    fn persist(&self) {
        if let Some(path) = &self.snapshot {
            if let Err(e) = self.network.save(path) {
                warn!(path = %path.display(), error = %e, "failed to save snapshot");
            }
        }
    }
}

/// Build a route from the raw `b` tokens.
fn parse_route(args: &[String; 5]) -> Result<Route, String> {
    let [num, source, destination, travel_time, fare] = args;
    Ok(Route {
        num: RouteNum::parse(num).map_err(|e| e.to_string())?,
        source: TerminalName::parse(source).map_err(|e| e.to_string())?,
        destination: TerminalName::parse(destination).map_err(|e| e.to_string())?,
        travel_time: TravelTime::parse(travel_time).map_err(|e| e.to_string())?,
        fare: Fare::parse(fare).map_err(|e| e.to_string())?,
    })
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            Network::new(),
            ScheduleConfig::default(),
            PlannerConfig::default(),
        )
    }
}
