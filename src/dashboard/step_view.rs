//! Rendering for the dashboard screens.
//!
//! All widgets are built from viewmodel derivations of the lifecycle
//! snapshot; nothing in here mutates state.

use super::app::{DashboardApp, Section, StepSession};
use super::views::{tabs_for, tone_color, ContentView};
use crate::nav::ContextKind;
use crate::phase::ExecutionPhase;
use crate::viewmodel::{
    format_elapsed, heatmap_cells, kpi_strip, lifecycle_dots, summary_tone, testline_rows,
    DotState, Tone,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

impl DashboardApp {
    /// Render the whole screen.
    pub fn render(&self, frame: &mut Frame) {
        let body = if self.nav.sidebar_expanded() {
            let outer = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(14), Constraint::Min(0)])
                .split(frame.area());
            self.render_context_rail(frame, outer[0]);
            outer[1]
        } else {
            frame.area()
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header with tabs
                Constraint::Min(0),    // Main content
                Constraint::Length(2), // Key hints + meta line
            ])
            .split(body);

        self.render_header(frame, chunks[0]);
        self.render_content(frame, chunks[1]);
        self.render_footer(frame, chunks[2]);
    }

    /// Tier-1 context rail, hidden when the sidebar is collapsed ('b').
    fn render_context_rail(&self, frame: &mut Frame, area: Rect) {
        let active = self.nav.active_context();
        let lines: Vec<Line> = [
            (ContextKind::Global, "Global"),
            (ContextKind::Personal, "Personal"),
            (ContextKind::Project, "Project"),
        ]
        .into_iter()
        .map(|(kind, label)| {
            if kind == active {
                Line::from(Span::styled(
                    format!("▶ {label}"),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(
                    format!("  {label}"),
                    Style::default().fg(Color::DarkGray),
                ))
            }
        })
        .collect();

        let rail = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" [x] [b] "),
        );
        frame.render_widget(rail, area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let kind = self.nav.active_context();
        let titles: Vec<Line> = tabs_for(kind).iter().map(|t| Line::from(*t)).collect();
        let selected = tabs_for(kind)
            .iter()
            .position(|t| *t == self.nav.active_tab())
            .unwrap_or(0);

        let context_label = match self.nav.active_project_id() {
            Some(id) => {
                let name = self
                    .data
                    .projects
                    .iter()
                    .find(|p| p.id == id)
                    .map(|p| p.name.as_str())
                    .unwrap_or(id);
                format!(" fwdash — {name} ")
            }
            None => " fwdash ".to_string(),
        };

        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title(context_label))
            .select(selected)
            .style(Style::default().fg(Color::White))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );

        frame.render_widget(tabs, area);
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        match self.content_view() {
            ContentView::Explorer => self.render_explorer(frame, area),
            ContentView::PersonalDashboard => self.render_personal(frame, area),
            ContentView::WorkflowRun => self.render_workflow(frame, area),
            ContentView::Placeholder => self.render_placeholder(frame, area),
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let hints = match self.content_view() {
            ContentView::WorkflowRun => {
                " Tab tabs  x context  ↑↓ steps  c cycle  a abort  l lifecycle  q quit"
            }
            ContentView::Explorer => " Tab tabs  x context  ↑↓ select  Enter open  q quit",
            _ => " Tab tabs  x context  q quit",
        };
        frame.render_widget(
            Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
            chunks[0],
        );

        let header = &self.data.run_header;
        let meta = Line::from(vec![
            Span::styled(
                format!(" Suite: {}", header.suite),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled("  •  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Branch: {}", header.branch),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled("  •  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Orchestrator: {}", header.orchestrator),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(meta), chunks[1]);
    }

    fn render_explorer(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .data
            .projects
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let is_selected = i == self.project_cursor;
                let name_style = if is_selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let line = Line::from(vec![
                    Span::styled(
                        if is_selected { "▶ " } else { "  " },
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(format!("{:<18}", p.name), name_style),
                    Span::styled(format!("{:<8}", p.code_name), Style::default().fg(Color::Cyan)),
                    Span::styled(
                        format!("last accessed {}", p.last_accessed),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]);
                ListItem::new(line)
            })
            .collect();

        let title = format!(" Projects ({}) ", self.data.projects.len());
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(list, area);
    }

    fn render_personal(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "ACTIVE ENGINEERING RUNS",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "14",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        let card = Paragraph::new(lines)
            .alignment(ratatui::layout::Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Personal Workspace "),
            );
        frame.render_widget(card, area);
    }

    fn render_placeholder(&self, frame: &mut Frame, area: Rect) {
        let message = format!("{} — not built in this demo", self.nav.active_tab());
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }

    fn render_workflow(&self, frame: &mut Frame, area: Rect) {
        let sidebar_width = if self.stages_collapsed { 6 } else { 30 };
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
            .split(area);

        self.render_stages_sidebar(frame, chunks[0]);
        if let Some(session) = self.session() {
            self.render_step(frame, chunks[1], session);
        }
    }

    fn render_stages_sidebar(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(if self.stages_collapsed {
                " ≡ ".to_string()
            } else {
                format!(" Workflow Stages ({}) ", self.data.workflow.len())
            });

        if self.stages_collapsed {
            frame.render_widget(block, area);
            return;
        }

        let selected_id = self.selected_step().map(|s| s.id);
        let mut lines: Vec<Line> = Vec::new();
        for stage in &self.data.workflow {
            let stage_tone = match stage.status {
                crate::dataset::StepStatus::Success => Tone::Success,
                crate::dataset::StepStatus::InProgress => Tone::Accent,
                crate::dataset::StepStatus::Pending => Tone::Neutral,
            };
            lines.push(Line::from(vec![
                Span::styled("● ", Style::default().fg(tone_color(stage_tone))),
                Span::styled(
                    stage.name.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}%", stage.progress),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            for step in &stage.steps {
                let is_selected = selected_id.as_deref() == Some(step.id.as_str());
                let style = if is_selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                lines.push(Line::from(vec![
                    Span::styled(if is_selected { "  ▶ " } else { "    " }, style),
                    Span::styled(step.name.clone(), style),
                    Span::styled(
                        format!("  {}", step.status.label()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
            }
            lines.push(Line::from(""));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_step(&self, frame: &mut Frame, area: Rect, session: &StepSession) {
        let machine = session.machine();
        let phase = machine.current();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title ribbon
                Constraint::Length(5), // Summary cards
                Constraint::Length(3), // KPI strip
                Constraint::Min(0),    // Phase-specific body
            ])
            .split(area);

        self.render_step_ribbon(frame, chunks[0], session);
        self.render_summary_cards(frame, chunks[1], session);
        self.render_kpi_strip(frame, chunks[2], session);
        self.render_step_body(frame, chunks[3], session);

        if session.popover_open() {
            self.render_lifecycle_popover(frame, area, phase, session);
        }
    }

    fn render_step_ribbon(&self, frame: &mut Frame, area: Rect, session: &StepSession) {
        let machine = session.machine();
        let header = &self.data.run_header;
        let mut spans = vec![
            Span::styled(
                format!(" {} ", session.step_name.to_uppercase()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} · run {} · by {}", header.name, header.run_id, header.triggered_by),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if machine.can_abort() {
            spans.push(Span::styled(
                "  [a] abort",
                Style::default().fg(Color::Red),
            ));
        }
        if machine.current() == ExecutionPhase::Review {
            spans.push(Span::styled(
                "  [s] submit to NGA",
                Style::default().fg(Color::Cyan),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_summary_cards(&self, frame: &mut Frame, area: Rect, session: &StepSession) {
        let machine = session.machine();
        let phase = machine.current();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(area);

        // Card 1: orchestrator summary badge.
        let tone = summary_tone(phase, machine.outcome());
        let summary = Paragraph::new(vec![
            Line::from(Span::styled(
                machine.summary_label(),
                Style::default()
                    .fg(tone_color(tone))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                machine.current_info().description,
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" NGA Summary "));
        frame.render_widget(summary, chunks[0]);

        // Card 2: elapsed duration.
        let elapsed = Paragraph::new(Line::from(Span::styled(
            format_elapsed(machine.elapsed_seconds()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Elapsed Duration "),
        );
        frame.render_widget(elapsed, chunks[1]);

        // Card 3: step state dots + label; progress while executing.
        let dots: Vec<Span> = lifecycle_dots(phase)
            .into_iter()
            .map(|dot| match dot {
                DotState::Past => Span::styled("● ", Style::default().fg(Color::Green)),
                DotState::Current => Span::styled(
                    "● ",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                DotState::Future => Span::styled("○ ", Style::default().fg(Color::DarkGray)),
            })
            .collect();

        let badge_tone = if phase.requires_action() {
            Tone::Warning
        } else if phase == ExecutionPhase::Done {
            Tone::Success
        } else {
            Tone::Accent
        };
        let mut lines = vec![
            Line::from(dots),
            Line::from(Span::styled(
                machine.current_info().label,
                Style::default()
                    .fg(tone_color(badge_tone))
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        if phase == ExecutionPhase::Execution {
            lines.push(Line::from(Span::styled(
                format!("progress {}%", session.progress.percent()),
                Style::default().fg(Color::Cyan),
            )));
        }
        let state_card = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Step State [l] "),
        );
        frame.render_widget(state_card, chunks[2]);
    }

    fn render_kpi_strip(&self, frame: &mut Frame, area: Rect, session: &StepSession) {
        let machine = session.machine();
        let strip = kpi_strip(machine.current(), machine.outcome());
        if strip.is_empty() {
            return;
        }

        let mut spans: Vec<Span> = Vec::new();
        for kpi in &strip {
            let marker = if kpi.pulse { "◉" } else { " " };
            spans.push(Span::styled(
                format!(" {} {}{} ", kpi.label, kpi.value, marker),
                Style::default().fg(tone_color(kpi.tone)),
            ));
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }
        spans.pop();

        let strip_widget =
            Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(strip_widget, area);
    }

    fn render_step_body(&self, frame: &mut Frame, area: Rect, session: &StepSession) {
        let machine = session.machine();
        match machine.current() {
            ExecutionPhase::Discovery | ExecutionPhase::Submission => {
                self.render_busy_panel(frame, area, session)
            }
            ExecutionPhase::Result => self.render_resolution_panel(frame, area, session),
            _ => self.render_matrix_panels(frame, area, session),
        }
    }

    /// Full-area waiting panel shown during discovery and submission.
    fn render_busy_panel(&self, frame: &mut Frame, area: Rect, session: &StepSession) {
        let phase = session.machine().current();
        let (title, message) = if phase == ExecutionPhase::Discovery {
            (
                "DISCOVERY IN PROGRESS",
                "Scanning for available tests. This may take a moment.",
            )
        } else {
            (
                "DISPATCHING TO NGA",
                "Submitting payloads to the orchestrator. This can take up to ~15 minutes.",
            )
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let panel = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                title,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(message, Style::default().fg(Color::DarkGray))),
        ])
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(panel, chunks[0]);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(u16::from(session.progress.percent()));
        frame.render_widget(gauge, chunks[1]);
    }

    /// Resolution panel shown while the step waits on a pass/fail decision.
    fn render_resolution_panel(&self, frame: &mut Frame, area: Rect, session: &StepSession) {
        let machine = session.machine();
        let outcome = machine.outcome();

        let chosen = |label: &str, active: bool, tone: Tone| {
            if active {
                Span::styled(
                    format!("[{label}]"),
                    Style::default()
                        .fg(tone_color(tone))
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray))
            }
        };

        let reason_line = match &session.reason_input {
            Some(buffer) => Line::from(vec![
                Span::styled("reason> ", Style::default().fg(Color::Cyan)),
                Span::styled(buffer.clone(), Style::default().fg(Color::White)),
                Span::styled("▌", Style::default().fg(Color::Cyan)),
            ]),
            None => {
                let reason = machine.resolution_reason();
                if reason.trim().is_empty() {
                    Line::from(Span::styled(
                        "press r to enter a triage justification (required)",
                        Style::default().fg(Color::Yellow),
                    ))
                } else {
                    Line::from(vec![
                        Span::styled("reason: ", Style::default().fg(Color::DarkGray)),
                        Span::styled(reason.to_string(), Style::default().fg(Color::White)),
                    ])
                }
            }
        };

        let finalize_line = if machine.can_finalize() {
            Line::from(Span::styled(
                "Enter — finalize resolution",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                "Enter — finalize (disabled until outcome and reason are set)",
                Style::default().fg(Color::DarkGray),
            ))
        };

        let lines = vec![
            Line::from(Span::styled(
                "RESULT RESOLUTION REQUIRED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw("  p "),
                chosen(
                    "RESOLVE PASSED",
                    outcome == Some(crate::phase::Outcome::Passed),
                    Tone::Success,
                ),
                Span::raw("    f "),
                chosen(
                    "RESOLVE FAILED",
                    outcome == Some(crate::phase::Outcome::Failed),
                    Tone::Danger,
                ),
            ]),
            Line::from(""),
            reason_line,
            Line::from(""),
            finalize_line,
        ];

        let panel = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Resolution "));
        frame.render_widget(panel, area);
    }

    /// Settings, testline table and heat map with collapsible sections.
    fn render_matrix_panels(&self, frame: &mut Frame, area: Rect, session: &StepSession) {
        let machine = session.machine();
        let sections = &session.sections;

        let settings_height = if sections.is_collapsed(Section::Settings) {
            3
        } else {
            7
        };
        let heatmap_height = if sections.is_collapsed(Section::Heatmap) {
            3
        } else {
            8
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(settings_height),
                Constraint::Min(5),
                Constraint::Length(heatmap_height),
            ])
            .split(area);

        // Settings table.
        let settings_block = Block::default()
            .borders(Borders::ALL)
            .title(" [1] Test Settings ");
        if sections.is_collapsed(Section::Settings) {
            frame.render_widget(settings_block, chunks[0]);
        } else {
            let s = &self.data.test_settings;
            let rows = vec![
                Line::from(format!(
                    "  PLATFORM {:<22} BUILD TYPE {}",
                    s.platform, s.build_type
                )),
                Line::from(format!(
                    "  STEPPING {:<22} COMPILER   {}",
                    s.silicon_stepping, s.compiler
                )),
                Line::from(format!(
                    "  BOOT GUARD {:<20} SIGNING KEY {}",
                    s.boot_guard, s.signing_key
                )),
            ];
            frame.render_widget(Paragraph::new(rows).block(settings_block), chunks[0]);
        }

        // Testline table.
        let count = self.config.testline_count;
        let title = if machine.current() == ExecutionPhase::Review {
            format!(" [2] Discovered Tests ({count}) ")
        } else {
            format!(" [2] Testlines Matrix ({count}) ")
        };
        let table_block = Block::default().borders(Borders::ALL).title(title);
        if sections.is_collapsed(Section::Table) {
            frame.render_widget(table_block, chunks[1]);
        } else {
            let visible = chunks[1].height.saturating_sub(2) as usize;
            let items: Vec<ListItem> =
                testline_rows(machine.current(), machine.outcome(), count)
                    .into_iter()
                    .take(visible)
                    .map(|row| {
                        let tone = row.status.tone();
                        ListItem::new(Line::from(vec![
                            Span::styled(
                                format!("  {:<28}", row.name),
                                Style::default().fg(Color::White),
                            ),
                            Span::styled(
                                row.status.label(),
                                Style::default().fg(tone_color(tone)),
                            ),
                        ]))
                    })
                    .collect();
            frame.render_widget(List::new(items).block(table_block), chunks[1]);
        }

        // Heat map.
        let heatmap_block = Block::default()
            .borders(Borders::ALL)
            .title(" [3] Heat Map ");
        if sections.is_collapsed(Section::Heatmap) {
            frame.render_widget(heatmap_block, chunks[2]);
        } else {
            let cells = heatmap_cells(machine.current(), machine.outcome(), count);
            let per_row = 10;
            let lines: Vec<Line> = cells
                .chunks(per_row)
                .map(|row| {
                    Line::from(
                        row.iter()
                            .map(|tone| {
                                Span::styled("■ ", Style::default().fg(tone_color(*tone)))
                            })
                            .collect::<Vec<_>>(),
                    )
                })
                .collect();
            frame.render_widget(Paragraph::new(lines).block(heatmap_block), chunks[2]);
        }
    }

    /// Centered popover listing every phase with past/current markers.
    fn render_lifecycle_popover(
        &self,
        frame: &mut Frame,
        area: Rect,
        phase: ExecutionPhase,
        session: &StepSession,
    ) {
        let width = 44u16.min(area.width);
        let height = (ExecutionPhase::all().len() as u16 + 2).min(area.height);
        let popover_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        let kind = session.machine().kind();
        let lines: Vec<Line> = ExecutionPhase::all()
            .iter()
            .zip(lifecycle_dots(phase))
            .map(|(p, dot)| {
                let info = kind.phase_info(*p);
                let (marker, style) = match dot {
                    DotState::Past => ("●", Style::default().fg(Color::Green)),
                    DotState::Current => (
                        "●",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    DotState::Future => ("○", Style::default().fg(Color::DarkGray)),
                };
                let mut spans = vec![
                    Span::styled(format!(" {marker} "), style),
                    Span::styled(format!("{:<12}", info.label), style),
                ];
                if dot == DotState::Current {
                    spans.push(Span::styled(
                        "current",
                        Style::default().fg(Color::Cyan),
                    ));
                }
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Clear, popover_area);
        let popover = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Lifecycle Overview "),
        );
        frame.render_widget(popover, popover_area);
    }
}
