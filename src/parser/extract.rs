//! Regex extraction of PC components from free-form listing text.
//!
//! Listings are written by sellers in Russian with no fixed layout.
//! Labeled lines (`Процессор: ...`) are the most reliable signal and
//! are searched before the whole text.

use crate::models::CaseColor;
use regex::Regex;

const RAM_SIZES: &[i64] = &[8, 16, 32, 48, 64, 96, 128];

pub struct ComponentExtractor {
    cpu_patterns: Vec<Regex>,
    gpu_patterns: Vec<Regex>,
    cpu_context: Regex,
    gpu_context: Regex,
    ram_multiplied: Regex,
    ram_contexts: Vec<Regex>,
    ram_bare: Regex,
    cpu_ultra: Regex,
    cpu_ryzen: Regex,
    cpu_core: Regex,
    gpu_nvidia: Regex,
    gpu_amd: Regex,
    case_context: Regex,
}

impl ComponentExtractor {
    pub fn new() -> Self {
        let compile = |pattern: &str| Regex::new(pattern).expect("invalid component pattern");

        Self {
            cpu_patterns: vec![
                compile(r"(?i)(?:Intel\s*)?Core\s*Ultra\s*[579]\s*\d{3,4}[A-Z]*"),
                compile(r"(?i)(?:Intel\s*)?(?:Core\s*)?i[3579][\s\-]*\d{4,5}[A-Z]*"),
                compile(r"(?i)(?:AMD\s*)?Ryzen\s*[3579]?\s*\d{4}[A-Z0-9]*"),
                compile(r"(?i)i[3579][\s\-]*\d{4,5}"),
                compile(r"(?i)R[3579][\s\-]*\d{4}"),
            ],
            gpu_patterns: vec![
                compile(r"(?i)(?:GeForce\s*)?RTX\s*\d{4}(?:\s*Ti|\s*SUPER)?"),
                compile(r"(?i)(?:GeForce\s*)?GTX\s*\d{3,4}(?:\s*Ti)?"),
                compile(r"(?i)(?:Radeon\s*)?RX\s*\d{3,4}(?:\s*XT)?"),
                compile(r"(?i)(?:AMD\s*)?Radeon\s*\d{4}(?:\s*XT)?"),
                compile(r"(?i)(?:Intel\s*)?ARC\s*A\d{3,4}"),
            ],
            cpu_context: compile(r"(?i)процессор[:\s\-]+([^\n\t]+)"),
            gpu_context: compile(r"(?i)видеокарта[:\s\-]+([^\n\t]+)"),
            // [xх] also matches the Cyrillic letter sellers often type
            ram_multiplied: compile(r"(?i)(\d+)\s*[xх]\s*(\d+)\s*GB"),
            ram_contexts: vec![
                compile(r"(?i)оперативная память[:\s\-]+[^0-9]*(\d+)\s*GB"),
                compile(r"(?i)память[:\s\-]+[^0-9]*(\d+)\s*GB"),
                compile(r"(?i)DDR\d[:\s]+[^0-9]*(\d+)\s*GB"),
                compile(r"(?i)RAM[:\s]+(\d+)\s*GB"),
                compile(r"(?i)ОЗУ[:\s]+(\d+)\s*GB"),
            ],
            ram_bare: compile(r"(?i)(\d+)\s*GB"),
            cpu_ultra: compile(r"(?i)(?:Intel\s*)?Core\s*Ultra\s*(\d)"),
            cpu_ryzen: compile(r"(?i)(?:AMD\s*)?Ryzen\s*(\d)"),
            cpu_core: compile(r"(?i)(?:Intel\s*)?(?:Core\s*)?i(\d)"),
            gpu_nvidia: compile(r"(?i)NVIDIA\s*|GeForce\s*"),
            gpu_amd: compile(r"(?i)AMD\s*|Radeon\s*"),
            case_context: compile(r"корпус[:\s]+([^\n\t]+)"),
        }
    }

    pub fn extract_cpu(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let text = normalize_dashes(text);

        if let Some(captures) = self.cpu_context.captures(&text) {
            let context = captures.get(1).map_or("", |m| m.as_str());
            for pattern in &self.cpu_patterns {
                if let Some(found) = pattern.find(context) {
                    return self.normalize_cpu(found.as_str());
                }
            }
        }

        for pattern in &self.cpu_patterns {
            if let Some(found) = pattern.find(&text) {
                return self.normalize_cpu(found.as_str());
            }
        }

        String::new()
    }

    pub fn extract_gpu(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let text = normalize_dashes(text);

        if let Some(captures) = self.gpu_context.captures(&text) {
            let context = captures.get(1).map_or("", |m| m.as_str());
            for pattern in &self.gpu_patterns {
                if let Some(found) = pattern.find(context) {
                    return self.normalize_gpu(found.as_str());
                }
            }
        }

        for pattern in &self.gpu_patterns {
            if let Some(found) = pattern.find(&text) {
                return self.normalize_gpu(found.as_str());
            }
        }

        String::new()
    }

    /// Total RAM in gigabytes, as a string. Values outside the plausible
    /// module sums are treated as noise (storage sizes, model numbers).
    pub fn extract_ram(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        // "2x8GB" style listings give the module count and size
        if let Some(captures) = self.ram_multiplied.captures(text) {
            let count: i64 = captures[1].parse().unwrap_or(0);
            let size: i64 = captures[2].parse().unwrap_or(0);
            let total = count * size;
            if RAM_SIZES.contains(&total) {
                return total.to_string();
            }
        }

        for pattern in &self.ram_contexts {
            if let Some(captures) = pattern.captures(text) {
                if let Ok(ram) = captures[1].parse::<i64>() {
                    if RAM_SIZES.contains(&ram) {
                        return ram.to_string();
                    }
                }
            }
        }

        for captures in self.ram_bare.captures_iter(text) {
            if let Ok(ram) = captures[1].parse::<i64>() {
                if RAM_SIZES.contains(&ram) {
                    return ram.to_string();
                }
            }
        }

        String::new()
    }

    fn normalize_cpu(&self, cpu: &str) -> String {
        let cpu = self.cpu_ultra.replace_all(cpu, "U${1}");
        let cpu = self.cpu_ryzen.replace_all(&cpu, "R${1}");
        let cpu = self.cpu_core.replace_all(&cpu, "I${1}");
        cpu.trim().to_uppercase()
    }

    fn normalize_gpu(&self, gpu: &str) -> String {
        let gpu = self.gpu_nvidia.replace_all(gpu, "");
        let gpu = self.gpu_amd.replace_all(&gpu, "");
        gpu.trim().to_uppercase()
    }

    pub fn extract_case_color(&self, text: &str) -> Option<CaseColor> {
        if text.is_empty() {
            return None;
        }

        let text = text.to_lowercase();
        let captures = self.case_context.captures(&text)?;
        let case_info = captures.get(1)?.as_str();

        let white_indicators = ["белый", "белом", "white", "wh"];
        let black_indicators = ["черный", "чёрный", "черном", "black", "bk"];

        if white_indicators.iter().any(|w| case_info.contains(w)) {
            return Some(CaseColor::White);
        }
        if black_indicators.iter().any(|b| case_info.contains(b)) {
            return Some(CaseColor::Black);
        }

        None
    }
}

impl Default for ComponentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_dashes(text: &str) -> String {
    text.replace('–', "-").replace('—', "-")
}
