//! Per-phase timing and process memory for a card generation run.

use std::sync::Mutex;
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

#[derive(Debug, Clone)]
pub struct PhaseSample {
    pub phase: String,
    /// 自上一個階段結束起算
    pub duration: Duration,
    pub memory_mb: Option<u64>,
    pub cpu_usage: Option<f32>,
}

#[cfg(feature = "cli")]
struct ProcessSampler {
    system: System,
    pid: Pid,
}

#[cfg(feature = "cli")]
impl ProcessSampler {
    fn new() -> Option<Self> {
        match sysinfo::get_current_pid() {
            Ok(pid) => Some(Self {
                system: System::new(),
                pid,
            }),
            Err(e) => {
                tracing::warn!("Unable to resolve current PID, memory will not be sampled: {}", e);
                None
            }
        }
    }

    fn sample(&mut self) -> (Option<u64>, Option<f32>) {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[self.pid]),
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        match self.system.process(self.pid) {
            Some(process) => (
                Some(process.memory() / 1024 / 1024),
                Some(process.cpu_usage()),
            ),
            None => (None, None),
        }
    }
}

#[cfg(not(feature = "cli"))]
struct ProcessSampler;

#[cfg(not(feature = "cli"))]
impl ProcessSampler {
    fn new() -> Option<Self> {
        None
    }

    fn sample(&mut self) -> (Option<u64>, Option<f32>) {
        (None, None)
    }
}

struct MonitorState {
    sampler: Option<ProcessSampler>,
    last_mark: Instant,
    samples: Vec<PhaseSample>,
}

pub struct PhaseMonitor {
    enabled: bool,
    started: Instant,
    state: Mutex<MonitorState>,
}

impl PhaseMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            enabled,
            started: now,
            state: Mutex::new(MonitorState {
                sampler: if enabled { ProcessSampler::new() } else { None },
                last_mark: now,
                samples: Vec::new(),
            }),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 記錄一個階段結束
    pub fn mark(&self, phase: &str) {
        if !self.enabled {
            return;
        }
        let Ok(mut state) = self.state.lock() else {
            return;
        };

        let now = Instant::now();
        let duration = now.duration_since(state.last_mark);
        state.last_mark = now;
        let (memory_mb, cpu_usage) = state
            .sampler
            .as_mut()
            .map(ProcessSampler::sample)
            .unwrap_or((None, None));

        tracing::info!(
            "📊 {} took {:?}, memory: {}, CPU: {}",
            phase,
            duration,
            memory_mb.map_or("n/a".to_string(), |mb| format!("{}MB", mb)),
            cpu_usage.map_or("n/a".to_string(), |cpu| format!("{:.1}%", cpu))
        );

        state.samples.push(PhaseSample {
            phase: phase.to_string(),
            duration,
            memory_mb,
            cpu_usage,
        });
    }

    pub fn samples(&self) -> Vec<PhaseSample> {
        self.state
            .lock()
            .map(|state| state.samples.clone())
            .unwrap_or_default()
    }

    pub fn peak_memory_mb(&self) -> Option<u64> {
        self.samples().iter().filter_map(|s| s.memory_mb).max()
    }

    pub fn log_summary(&self) {
        if !self.enabled {
            return;
        }
        let samples = self.samples();
        let slowest = samples.iter().max_by_key(|s| s.duration);

        tracing::info!(
            "📊 Run finished in {:?}, peak memory: {}, slowest phase: {}",
            self.started.elapsed(),
            self.peak_memory_mb()
                .map_or("n/a".to_string(), |mb| format!("{}MB", mb)),
            slowest.map_or("n/a", |s| s.phase.as_str())
        );
    }
}

impl Default for PhaseMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_records_nothing() {
        let monitor = PhaseMonitor::new(false);
        monitor.mark("Extract");
        monitor.log_summary();

        assert!(!monitor.is_enabled());
        assert!(monitor.samples().is_empty());
        assert!(monitor.peak_memory_mb().is_none());
    }

    #[test]
    fn test_phases_recorded_in_order() {
        let monitor = PhaseMonitor::new(true);
        monitor.mark("Extract");
        std::thread::sleep(Duration::from_millis(5));
        monitor.mark("Transform");
        monitor.mark("Load");

        let samples = monitor.samples();
        let phases: Vec<&str> = samples.iter().map(|s| s.phase.as_str()).collect();
        assert_eq!(phases, vec!["Extract", "Transform", "Load"]);
        assert!(samples[1].duration >= Duration::from_millis(5));

        let total: Duration = samples.iter().map(|s| s.duration).sum();
        assert!(total <= monitor.started.elapsed());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_enabled_monitor_samples_memory() {
        let monitor = PhaseMonitor::new(true);
        monitor.mark("Extract");

        if let Some(memory) = monitor.samples()[0].memory_mb {
            assert_eq!(monitor.peak_memory_mb(), Some(memory));
        }
    }
}
