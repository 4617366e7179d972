use anyhow::{anyhow, bail, Result};

use crate::{
    cli::{Cli, Command},
    domain::{
        self,
        calculator::{self, CalculationInput, CryptoAsset},
        offer,
        response_rules::{self, Reply},
    },
    infra::{self, random::StdRandom},
    ui,
    usecases::{self, bootstrap, contracts::RandomSource, shell::DefaultShellOrchestrator},
};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command_or_default() {
        Command::Run => {
            let bootstrapped = bootstrap::bootstrap(cli.config.as_deref())?;
            let _log_guard = bootstrapped.log_guard;
            let context = bootstrapped.context;

            tracing::debug!(
                ui = ui::module_name(),
                domain = domain::module_name(),
                usecases = usecases::module_name(),
                infra = infra::module_name(),
                "module boundaries loaded"
            );

            let rng = StdRandom::from_config(&context.config.random);
            let mut orchestrator = DefaultShellOrchestrator::new(&context.config, rng);
            let mut event_source = ui::CrosstermEventSource;
            ui::shell::start(&context, &mut event_source, &mut orchestrator)?;
        }
        Command::Ask { text } => {
            let context = bootstrap::build_context(cli.config.as_deref())?;
            let mut rng = StdRandom::from_config(&context.config.random);

            match ask(&text.join(" "), &mut rng) {
                Some(reply) => println!("{reply}"),
                None => eprintln!("Nothing to ask: the message is blank."),
            }
        }
        Command::Calc {
            value,
            years,
            rate,
            crypto,
        } => {
            let input = calc_input(value, years, rate, &crypto)?;
            println!("{}", format_calculation(&input));
        }
    }

    Ok(())
}

/// Formatted engine reply, or `None` for blank input, which never reaches
/// the engine.
fn ask(text: &str, rng: &mut dyn RandomSource) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }

    Some(format_reply(&response_rules::respond(text, rng)))
}

fn calc_input(value: f64, years: u32, rate: f64, crypto: &str) -> Result<CalculationInput> {
    if !value.is_finite() {
        bail!("property value must be a finite number, got {value}");
    }
    if !rate.is_finite() {
        bail!("growth rate must be a finite number, got {rate}");
    }

    let asset = CryptoAsset::from_symbol(crypto)
        .ok_or_else(|| anyhow!("unsupported crypto asset: {crypto}"))?;

    Ok(CalculationInput {
        principal: value.max(0.0),
        years: calculator::clamp_years(years),
        annual_rate_percent: calculator::clamp_rate(rate),
        asset,
    })
}

fn format_reply(reply: &Reply) -> String {
    let mut out = reply.text.clone();

    for option in reply.options.iter().flatten() {
        out.push_str("\n  - ");
        out.push_str(&option.display_label());
    }

    out
}

fn format_calculation(input: &CalculationInput) -> String {
    let result = calculator::calculate(input);
    let mut lines = vec![
        format!(
            "Property value:  AED {}",
            offer::format_amount(input.principal.round() as u64)
        ),
        format!(
            "Period:          {} years at {:.0}% per year",
            input.years, input.annual_rate_percent
        ),
        format!(
            "Projected value: {}",
            calculator::format_millions(result.future_value)
        ),
        format!(
            "Total return:    {} (+{:.1}%)",
            calculator::format_millions(result.total_return),
            result.roi_percent
        ),
        format!(
            "Monthly rental:  AED {}",
            offer::format_amount(result.monthly_rental.round() as u64)
        ),
        format!(
            "Pay in crypto:   {:.4} {}",
            result.units_of_crypto,
            input.asset.symbol()
        ),
        String::new(),
    ];

    lines.extend(
        calculator::yearly_projection(input)
            .into_iter()
            .map(|point| format!("Year {:>2}: {}", point.year, calculator::format_millions(point.value))),
    );

    lines.join("\n")
}
