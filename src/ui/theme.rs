//! Shared Tailwind class strings so pages stay visually consistent.

// ============================================
// BUTTON STYLES
// ============================================

pub const BUTTON_PRIMARY: &str = "rounded-lg bg-teal-500 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-slate-950 transition hover:bg-teal-400 disabled:cursor-not-allowed disabled:opacity-50";
pub const BUTTON_SECONDARY: &str = "rounded-lg border border-slate-600 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-slate-200 transition hover:bg-slate-800";
pub const BUTTON_DANGER: &str = "rounded-lg border border-rose-500/40 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-rose-200 transition hover:bg-rose-500/10";
pub const BUTTON_GHOST: &str = "text-xs font-semibold uppercase tracking-wide text-teal-300 hover:text-teal-100";

pub fn nav_button(active: bool) -> &'static str {
    if active {
        "rounded-lg border border-teal-500/60 bg-teal-500/15 px-3 py-1.5 font-semibold text-teal-200"
    } else {
        "rounded-lg border border-transparent px-3 py-1.5 text-slate-400 transition hover:border-slate-700 hover:bg-slate-900/80 hover:text-slate-200"
    }
}

pub fn toggle_button(active: bool) -> &'static str {
    if active {
        "rounded-lg border border-teal-500/60 bg-teal-500/15 px-3 py-1.5 text-xs font-semibold text-teal-200"
    } else {
        "rounded-lg border border-slate-700 px-3 py-1.5 text-xs text-slate-400 transition hover:border-slate-500 hover:text-slate-200"
    }
}

// ============================================
// INPUT STYLES
// ============================================

pub const INPUT: &str = "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-teal-500 focus:outline-none";
pub const LABEL: &str = "block text-xs font-semibold uppercase text-slate-500";

// ============================================
// PANEL / TABLE STYLES
// ============================================

pub const PANEL: &str = "rounded-xl border border-slate-800 bg-slate-900/40 p-6";
pub const PANEL_TITLE: &str = "text-sm font-semibold uppercase tracking-wide text-slate-500";
pub const TABLE_CONTAINER: &str = "overflow-hidden rounded-xl border border-slate-800 bg-slate-900/40";
pub const TABLE_HEADER: &str = "border-b border-slate-800 bg-slate-900/60 text-xs uppercase text-slate-500";
pub const TABLE_DIVIDER: &str = "divide-y divide-slate-800";

// ============================================
// TEXT STYLES
// ============================================

pub const TEXT_MUTED: &str = "text-slate-500";
pub const TEXT_ACCENT: &str = "text-teal-300";
pub const ERROR_TEXT: &str = "text-sm text-rose-300";
