use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Ids and selectors the page markup has to provide.
#[derive(Debug, Clone, Copy)]
pub struct Selectors {
    pub header_id: &'static str,
    pub nav_toggle: &'static str,
    pub anchors: &'static str,
    pub reveal: &'static str,
    pub skill_bar: &'static str,
    pub skill_attr: &'static str,
    pub skill_fill: &'static str,
    pub form_id: &'static str,
    pub send_button_id: &'static str,
    pub status_id: &'static str,
    pub name_id: &'static str,
    pub email_id: &'static str,
    pub message_id: &'static str,
    pub year_id: &'static str,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            header_id: "site-header",
            nav_toggle: ".nav-toggle",
            anchors: "a[href^=\"#\"]",
            reveal: ".reveal",
            skill_bar: "[data-skill]",
            skill_attr: "data-skill",
            skill_fill: "span",
            form_id: "contact-form",
            send_button_id: "send-btn",
            status_id: "form-status",
            name_id: "name",
            email_id: "email",
            message_id: "message",
            year_id: "year",
        }
    }
}

/// Classes the stylesheet reacts to.
#[derive(Debug, Clone, Copy)]
pub struct Classes {
    pub nav_open: &'static str,
    pub in_view: &'static str,
    pub tabbing: &'static str,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            nav_open: "nav-open",
            in_view: "in-view",
            tabbing: "user-is-tabbing",
        }
    }
}

/// All delays are in milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    pub resize_debounce_ms: u32,
    pub skill_fill_delay_ms: u32,
    pub form_sent_delay_ms: u32,
    pub form_reset_delay_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            resize_debounce_ms: 80,
            skill_fill_delay_ms: 120,
            form_sent_delay_ms: 1_200,
            form_reset_delay_ms: 3_000,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub header_var: &'static str,
    pub fallback_header_height: f64,
    pub scroll_margin: f64,
    pub reveal_threshold: f64,
    pub reveal_root_margin: &'static str,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            header_var: "--header-height",
            fallback_header_height: 72.0,
            scroll_margin: 12.0,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -10% 0px",
        }
    }
}

/// User-facing text of the contact form. The page is written in Indonesian.
#[derive(Debug, Clone, Copy)]
pub struct FormCopy {
    pub idle_label: &'static str,
    pub sending_label: &'static str,
    pub sent_label: &'static str,
    pub incomplete: &'static str,
    pub thanks: &'static str,
}

impl Default for FormCopy {
    fn default() -> Self {
        Self {
            idle_label: "Kirim Pesan",
            sending_label: "Mengirim...",
            sent_label: "Terkirim ✓",
            incomplete: "Lengkapi semua bidang sebelum mengirim.",
            thanks: "Terima kasih — pesan Anda telah diterima. Saya akan menghubungi Anda segera.",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PageConfig {
    pub selectors: Selectors,
    pub classes: Classes,
    pub timings: Timings,
    pub layout: Layout,
    pub copy: FormCopy,
}
