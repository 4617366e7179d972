use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::{
    domain::{
        calculator::{self, CryptoAsset},
        offer::{self, OfferField, PaymentMethod, OFFER_PRESETS, OFFER_STEPS},
        wizard::WizardPhase,
    },
    usecases::shell_state::{Screen, ShellState},
};

use super::message_input::render_text_input;
use super::message_rendering::{build_chat_list_elements, element_to_list_item};
use super::styles;

const CHAT_PLACEHOLDER: &str = "Ask Luna about Dubai properties...";
const BAR_WIDTH: f64 = 30.0;

pub fn render(frame: &mut Frame<'_>, state: &ShellState) {
    let [content_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .areas(frame.area());

    if state.screen() == Screen::Loading {
        render_loading(frame, content_area, state);
    } else {
        let [tabs_area, body_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .areas(content_area);

        render_tabs(frame, tabs_area, state.screen());
        match state.screen() {
            Screen::Loading => {}
            Screen::Chat => render_chat(frame, body_area, state),
            Screen::Calculator => render_calculator(frame, body_area, state),
            Screen::Offer => render_offer(frame, body_area, state),
        }
    }

    let status = Paragraph::new(status_line(state)).style(styles::status_bar_style());
    frame.render_widget(status, status_area);
}

fn render_loading(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let [_, gauge_area, _] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .areas(area);

    let percent = state.loader().progress().percent();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title("CryptoHomes · Dubai Real Estate")
                .borders(Borders::ALL)
                .border_style(styles::active_panel_border_style()),
        )
        .gauge_style(styles::gauge_style())
        .percent(percent)
        .label(if state.loader().is_active() {
            format!("Loading {percent}%")
        } else {
            "Ready".to_owned()
        });

    frame.render_widget(gauge, gauge_area);
}

fn render_tabs(frame: &mut Frame<'_>, area: Rect, screen: Screen) {
    let selected = Screen::TABS.iter().position(|tab| *tab == screen);
    let tabs = Tabs::new(Screen::TABS.iter().map(|tab| tab.title()).collect::<Vec<_>>())
        .block(Block::default().title("CryptoHomes").borders(Borders::ALL))
        .select(selected.unwrap_or(0))
        .highlight_style(styles::active_tab_style());

    frame.render_widget(tabs, area);
}

fn render_chat(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let [messages_area, actions_area, input_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .areas(area);

    let chat = state.chat();
    let elements =
        build_chat_list_elements(chat.messages(), state.selected_option(), chat.is_typing());
    let items: Vec<ListItem<'static>> = elements.iter().map(element_to_list_item).collect();

    // Keeping the last element selected pins the view to the newest message.
    let mut list_state = ListState::default();
    list_state.select(items.len().checked_sub(1));

    let list = List::new(items).block(
        Block::default()
            .title("Luna · CryptoHomes AI")
            .borders(Borders::ALL)
            .border_style(styles::inactive_panel_border_style()),
    );
    frame.render_stateful_widget(list, messages_area, &mut list_state);

    frame.render_widget(Paragraph::new(quick_actions_line(state)), actions_area);

    render_text_input(
        frame,
        input_area,
        "Message",
        state.chat_input(),
        CHAT_PLACEHOLDER,
        true,
    );
}

fn quick_actions_line(state: &ShellState) -> Line<'static> {
    let spans = state
        .chat()
        .quick_actions()
        .iter()
        .enumerate()
        .flat_map(|(index, option)| {
            [
                Span::styled(format!(" F{} ", index + 1), styles::field_label_style()),
                Span::styled(option.display_label(), styles::option_style(false)),
            ]
        })
        .collect::<Vec<_>>();

    Line::from(spans)
}

fn render_calculator(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let [inputs_area, results_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .areas(area);

    let inputs = Paragraph::new(calculator_input_lines(state)).block(
        Block::default()
            .title("Investment Calculator")
            .borders(Borders::ALL)
            .border_style(styles::active_panel_border_style()),
    );
    frame.render_widget(inputs, inputs_area);

    let results = Paragraph::new(calculator_result_lines(state))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Projection")
                .borders(Borders::ALL)
                .border_style(styles::inactive_panel_border_style()),
        );
    frame.render_widget(results, results_area);
}

fn labelled(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<18}"), styles::field_label_style()),
        Span::raw(value),
    ])
}

fn calculator_input_lines(state: &ShellState) -> Vec<Line<'static>> {
    let input = state.calculator().input();

    vec![
        labelled(
            "Property Value",
            format!(
                "AED {} (v)",
                offer::format_amount(input.principal.round() as u64)
            ),
        ),
        labelled("Period", format!("{} years (↑/↓)", input.years)),
        labelled(
            "Expected Growth",
            format!("{:.0}% per year (←/→)", input.annual_rate_percent),
        ),
        labelled("Pay With", format!("{} (c)", input.asset.symbol())),
        Line::default(),
        Line::from(Span::styled(
            "Enter: calculate".to_owned(),
            styles::field_label_style(),
        )),
    ]
}

fn calculator_result_lines(state: &ShellState) -> Vec<Line<'static>> {
    let calculator = state.calculator();

    if calculator.is_calculating() {
        return vec![Line::from("Calculating your returns...")];
    }
    if !calculator.show_results() {
        return vec![Line::from(
            "Adjust the inputs and press Enter to see your projected returns.",
        )];
    }

    let input = calculator.input();
    let result = calculator.results();
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{:<18}", "Projected Value"), styles::field_label_style()),
            Span::styled(
                calculator::format_millions(result.future_value),
                styles::highlight_value_style(),
            ),
        ]),
        labelled(
            "Total Return",
            format!(
                "{} (+{:.1}%)",
                calculator::format_millions(result.total_return),
                result.roi_percent
            ),
        ),
        labelled(
            "Monthly Rental",
            format!("AED {}", offer::format_amount(result.monthly_rental.round() as u64)),
        ),
        labelled(
            "Pay In Crypto",
            format!("{:.4} {}", result.units_of_crypto, input.asset.symbol()),
        ),
        Line::default(),
    ];

    for point in calculator.projection() {
        let width = (point.relative_height / 100.0 * BAR_WIDTH).round() as usize;
        lines.push(Line::from(vec![
            Span::styled(format!("Y{:<3}", point.year), styles::field_label_style()),
            Span::styled("█".repeat(width.max(1)), styles::bar_style()),
            Span::raw(format!(" {}", calculator::format_millions(point.value))),
        ]));
    }

    lines.push(Line::default());
    for conversion in calculator.conversions() {
        lines.push(conversion_line(conversion.asset, conversion.units));
    }

    lines
}

fn conversion_line(asset: CryptoAsset, units: f64) -> Line<'static> {
    let quote = asset.quote();
    let change_style = if quote.change_24h_percent < 0.0 {
        styles::warning_style()
    } else {
        styles::highlight_value_style()
    };

    Line::from(vec![
        Span::styled(format!("{:<6}", asset.symbol()), styles::field_label_style()),
        Span::raw(format!("{units:>14.4}  @ ${:<10}", quote.price)),
        Span::styled(format!("{:+.2}%", quote.change_24h_percent), change_style),
    ])
}

fn render_offer(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let [body_area, input_area, notice_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(area);

    let body = Paragraph::new(offer_lines(state))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(offer_title(state.offer().phase()))
                .borders(Borders::ALL)
                .border_style(styles::active_panel_border_style()),
        );
    frame.render_widget(body, body_area);

    if let Some(field) = state.focused_offer_field() {
        render_text_input(frame, input_area, field.label(), state.offer_input(), "", true);
    }

    if let Some(notice) = state.notice() {
        frame.render_widget(
            Paragraph::new(notice.to_owned()).style(styles::notice_style()),
            notice_area,
        );
    }
}

fn offer_title(phase: WizardPhase) -> String {
    match phase {
        WizardPhase::Step(step) => format!(
            "Make an Offer · Step {} of {}: {}",
            step + 1,
            OFFER_STEPS.len(),
            OFFER_STEPS[step]
        ),
        WizardPhase::Submitting => "Make an Offer · Submitting".to_owned(),
        WizardPhase::Complete => "Make an Offer · Submitted".to_owned(),
    }
}

fn offer_lines(state: &ShellState) -> Vec<Line<'static>> {
    let offer = state.offer();
    let fields = offer.fields();

    match offer.phase() {
        WizardPhase::Submitting => vec![Line::from("Submitting your offer...")],
        WizardPhase::Complete => {
            let mut lines = vec![
                Line::from(Span::styled(
                    "Offer Submitted!".to_owned(),
                    styles::highlight_value_style(),
                )),
                Line::from(format!(
                    "Your offer of AED {} has been sent to the seller.",
                    offer::format_amount(fields.amount())
                )),
            ];
            if let Some(reference) = offer.reference() {
                lines.push(labelled("Reference", format!("#{reference}")));
            }
            lines.push(Line::default());
            lines.push(Line::from("Press Enter to start a new offer."));
            lines
        }
        WizardPhase::Step(0) => {
            let mut lines = vec![
                labelled(
                    "List Price",
                    format!("AED {}", offer::format_amount(offer.list_price())),
                ),
                labelled(
                    "Your Offer",
                    format!("AED {}", offer::format_amount(fields.amount())),
                ),
                Line::default(),
            ];
            let presets = OFFER_PRESETS
                .iter()
                .enumerate()
                .map(|(index, preset)| format!("F{} {}", index + 1, preset.label))
                .collect::<Vec<_>>()
                .join("   ");
            lines.push(Line::from(Span::styled(presets, styles::field_label_style())));
            if offer.offer_is_low() {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    "Offers significantly below asking price may be less likely to be accepted."
                        .to_owned(),
                    styles::warning_style(),
                )));
            }
            lines
        }
        WizardPhase::Step(1) => {
            let mut lines = PaymentMethod::ALL
                .iter()
                .map(|method| {
                    let selected = *method == fields.payment_method;
                    Line::from(vec![
                        Span::styled(
                            format!("{} {}", if selected { "●" } else { "○" }, method.label()),
                            styles::option_style(selected),
                        ),
                        Span::styled(
                            format!("  {}", method.sublabel()),
                            styles::field_label_style(),
                        ),
                    ])
                })
                .collect::<Vec<_>>();
            if fields.payment_method == PaymentMethod::Crypto {
                lines.push(Line::default());
                lines.push(labelled(
                    "Preferred Crypto",
                    format!("{} (←/→)", fields.preferred_crypto.symbol()),
                ));
            }
            lines
        }
        WizardPhase::Step(step) => {
            let mut lines = OfferField::for_step(step)
                .iter()
                .enumerate()
                .map(|(index, field)| {
                    let marker = if index == state.offer_focus() { "▸ " } else { "  " };
                    labelled(
                        &format!("{marker}{}", field.label()),
                        fields.get(*field).to_owned(),
                    )
                })
                .collect::<Vec<_>>();

            if step + 1 == OFFER_STEPS.len() {
                let mut review = review_lines(state);
                review.push(Line::default());
                review.append(&mut lines);
                lines = review;
            }
            lines
        }
    }
}

fn review_lines(state: &ShellState) -> Vec<Line<'static>> {
    let fields = state.offer().fields();
    let payment = match fields.payment_method {
        PaymentMethod::Crypto => format!(
            "{} ({})",
            fields.payment_method.label(),
            fields.preferred_crypto.symbol()
        ),
        method => method.label().to_owned(),
    };

    vec![
        labelled(
            "Offer Amount",
            format!("AED {}", offer::format_amount(fields.amount())),
        ),
        labelled("Payment", payment),
        labelled("Financing", fields.financing.label().to_owned()),
        labelled("Name", fields.name.clone()),
        labelled("Email", fields.email.clone()),
        labelled("Phone", fields.phone.clone()),
    ]
}

fn status_line(state: &ShellState) -> String {
    let hint = match state.screen() {
        Screen::Loading => "loading...",
        Screen::Chat => "Enter: send | ↑/↓: pick reply | F1-F4: quick actions | Tab: next",
        Screen::Calculator => "↑/↓: years | ←/→: rate | v: value | c: crypto | Enter: calculate",
        Screen::Offer if state.offer().can_continue() => {
            "Enter: continue | Esc: back | ↑/↓: field | Tab: leave (discards)"
        }
        Screen::Offer if state.offer().phase() == WizardPhase::Complete => {
            "Enter: new offer | Tab: leave"
        }
        Screen::Offer => "submitting... | Tab: leave (cancels)",
    };
    format!("{} | {hint} | Ctrl+C: quit", state.screen().title())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::AppConfig;

    fn line_to_string(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn lines_to_string(lines: &[Line<'_>]) -> String {
        lines.iter().map(line_to_string).collect::<Vec<_>>().join("\n")
    }

    fn state() -> ShellState {
        let mut state = ShellState::new(&AppConfig::default());
        state.set_screen(Screen::Chat);
        state
    }

    #[test]
    fn status_line_names_screen_and_quit_key() {
        let line = status_line(&state());

        assert!(line.starts_with("Luna AI"));
        assert!(line.contains("Ctrl+C: quit"));
    }

    #[test]
    fn quick_actions_are_numbered_by_function_key() {
        let text = line_to_string(&quick_actions_line(&state()));

        assert!(text.contains("F1 "));
        assert!(text.contains("Properties"));
        assert!(text.contains("F4 "));
    }

    #[test]
    fn calculator_hides_results_until_calculated() {
        let text = lines_to_string(&calculator_result_lines(&state()));

        assert!(text.contains("press Enter"));
        assert!(!text.contains("Projected Value"));
    }

    #[test]
    fn calculator_input_lines_show_defaults() {
        let text = lines_to_string(&calculator_input_lines(&state()));

        assert!(text.contains("AED 5,000,000"));
        assert!(text.contains("5 years"));
        assert!(text.contains("12% per year"));
        assert!(text.contains("BTC"));
    }

    #[test]
    fn first_offer_step_shows_list_price() {
        let text = lines_to_string(&offer_lines(&state()));

        assert!(text.contains("AED 15,500,000"));
        assert!(!text.contains("below asking price"));
    }

    #[test]
    fn low_offer_shows_warning() {
        let mut state = state();
        state.offer.apply_preset(0);

        let text = lines_to_string(&offer_lines(&state));

        assert!(text.contains("below asking price"));
    }

    #[test]
    fn offer_title_counts_steps_from_one() {
        assert_eq!(
            offer_title(WizardPhase::Step(1)),
            "Make an Offer · Step 2 of 4: Payment Method"
        );
    }

    #[test]
    fn review_step_summarises_payment_choice() {
        let mut state = state();
        for _ in 0..3 {
            state.offer.next();
        }

        let text = lines_to_string(&offer_lines(&state));

        assert!(text.contains("Cryptocurrency (BTC)"));
        assert!(text.contains("Additional Message"));
    }
}
