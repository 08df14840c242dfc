//! Command dispatch table
//!
//! Maps a command name to the rule that renders it. Arguments arrive raw from
//! the lexer; rules that need their content run them back through the whole
//! tokenize/parse/render chain.

use super::word::{render, RenderContext};
use crate::chem::parser::{parse_markup_at_depth, ExpressionNode, MAX_NESTING};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// How a command turns into word-equation text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandRule {
    /// A fixed glyph, emitted as is
    Glyph(&'static str),
    /// A reaction arrow, padded with a space on each side
    Arrow(&'static str),
    /// `\xrightarrow{above}` and friends, boxed with their label
    LabeledArrow(&'static str),
    Fraction,
    Root,
    /// The first argument, verbatim
    Text,
    /// The rendered argument followed by a combining mark
    Decoration(char),
    /// The rendered argument with its font style dropped
    Font,
    Placeholder,
    Binomial,
    /// Dropped together with all of its arguments
    Discard,
}

impl CommandRule {
    /// How many brace arguments the rule consumes. Any beyond that are
    /// rendered after the command's own output.
    fn arity(self) -> usize {
        match self {
            CommandRule::Glyph(_) | CommandRule::Arrow(_) => 0,
            CommandRule::LabeledArrow(_)
            | CommandRule::Root
            | CommandRule::Text
            | CommandRule::Decoration(_)
            | CommandRule::Font
            | CommandRule::Placeholder => 1,
            CommandRule::Fraction | CommandRule::Binomial => 2,
            CommandRule::Discard => usize::MAX,
        }
    }
}

const ARROWS: &[(&str, &str)] = &[
    ("rightarrow", "→"),
    ("to", "→"),
    ("longrightarrow", "→"),
    ("leftarrow", "←"),
    ("longleftarrow", "←"),
    ("leftrightarrow", "↔"),
    ("longleftrightarrow", "⟷"),
    ("rightleftharpoons", "⇌"),
    ("leftharpoons", "⇌"),
    ("Rightarrow", "⇒"),
    ("implies", "⇒"),
    ("Longrightarrow", "⇒"),
    ("Leftarrow", "⇐"),
    ("Longleftarrow", "⇐"),
    ("Leftrightarrow", "⇔"),
    ("iff", "⇔"),
    ("Longleftrightarrow", "⇔"),
];

const LABELED_ARROWS: &[(&str, &str)] = &[
    ("xrightarrow", "→"),
    ("xleftarrow", "←"),
    ("xleftrightarrow", "↔"),
];

const GREEK: &[(&str, &str)] = &[
    ("alpha", "α"),
    ("beta", "β"),
    ("gamma", "γ"),
    ("delta", "δ"),
    ("epsilon", "ε"),
    ("varepsilon", "ε"),
    ("zeta", "ζ"),
    ("eta", "η"),
    ("theta", "θ"),
    ("vartheta", "ϑ"),
    ("iota", "ι"),
    ("kappa", "κ"),
    ("lambda", "λ"),
    ("mu", "μ"),
    ("nu", "ν"),
    ("xi", "ξ"),
    ("pi", "π"),
    ("rho", "ρ"),
    ("sigma", "σ"),
    ("tau", "τ"),
    ("upsilon", "υ"),
    ("phi", "φ"),
    ("varphi", "ϕ"),
    ("chi", "χ"),
    ("psi", "ψ"),
    ("omega", "ω"),
    ("Alpha", "Α"),
    ("Beta", "Β"),
    ("Gamma", "Γ"),
    ("Delta", "Δ"),
    ("Theta", "Θ"),
    ("Lambda", "Λ"),
    ("Mu", "Μ"),
    ("Xi", "Ξ"),
    ("Pi", "Π"),
    ("Rho", "Ρ"),
    ("Sigma", "Σ"),
    ("Tau", "Τ"),
    ("Upsilon", "Υ"),
    ("Phi", "Φ"),
    ("Psi", "Ψ"),
    ("Omega", "Ω"),
];

const SYMBOLS: &[(&str, &str)] = &[
    // spacing
    (",", " "),
    (";", " "),
    (":", " "),
    ("!", " "),
    (" ", " "),
    ("thinspace", " "),
    ("quad", "    "),
    ("qquad", "    "),
    ("\\", "\n"),
    // operators and relations
    ("pm", "±"),
    ("mp", "∓"),
    ("times", "×"),
    ("cdot", "·"),
    ("div", "÷"),
    ("ast", "∗"),
    ("star", "⋆"),
    ("bullet", "•"),
    ("circ", "∘"),
    ("infty", "∞"),
    ("partial", "∂"),
    ("nabla", "∇"),
    ("int", "∫"),
    ("iint", "∬"),
    ("iiint", "∭"),
    ("oint", "∮"),
    ("sum", "∑"),
    ("prod", "∏"),
    ("therefore", "∴"),
    ("because", "∵"),
    ("angle", "∠"),
    ("approx", "≈"),
    ("simeq", "≃"),
    ("sim", "∼"),
    ("cong", "≅"),
    ("neq", "≠"),
    ("leq", "≤"),
    ("leqslant", "≤"),
    ("geq", "≥"),
    ("geqslant", "≥"),
    ("propto", "∝"),
    ("equiv", "≡"),
    ("triangleq", "≜"),
    ("perp", "⊥"),
    ("parallel", "∥"),
    ("subset", "⊂"),
    ("supset", "⊃"),
    ("subseteq", "⊆"),
    ("supseteq", "⊇"),
    ("in", "∈"),
    ("notin", "∉"),
    ("ni", "∋"),
    ("cup", "∪"),
    ("cap", "∩"),
    ("setminus", "∖"),
    ("forall", "∀"),
    ("exists", "∃"),
    ("land", "∧"),
    ("lor", "∨"),
    ("neg", "¬"),
    ("cdots", "⋯"),
    ("ldots", "…"),
    ("dotsc", "…"),
    ("vdots", "⋮"),
    ("ddots", "⋱"),
    ("triangle", "△"),
    ("bigtriangleup", "△"),
    ("triangleleft", "◁"),
    ("triangleright", "▷"),
    ("langle", "⟨"),
    ("rangle", "⟩"),
    ("lfloor", "⌊"),
    ("rfloor", "⌋"),
    ("lceil", "⌈"),
    ("rceil", "⌉"),
    ("deg", "°"),
    ("prime", "′"),
    ("emptyset", "∅"),
    ("aleph", "ℵ"),
    ("Box", "□"),
    // unpadded arrows
    ("uparrow", "↑"),
    ("downarrow", "↓"),
    ("updownarrow", "↕"),
    ("mapsto", "↦"),
    ("leftharpoondown", "↽"),
    ("rightharpoondown", "⇁"),
    ("leftharpoonup", "↼"),
    ("rightharpoonup", "⇀"),
];

const DECORATIONS: &[(&str, char)] = &[
    ("overline", '\u{0305}'),
    ("bar", '\u{0304}'),
    ("hat", '\u{0302}'),
    ("tilde", '\u{0303}'),
    ("vec", '\u{20D7}'),
    ("underline", '\u{0332}'),
];

const FONTS: &[&str] = &[
    "mathbb",
    "mathcal",
    "mathfrak",
    "mathscr",
    "mathbf",
    "mathit",
    "mathsf",
    "mathnormal",
    "boldsymbol",
];

static COMMANDS: Lazy<HashMap<&'static str, CommandRule>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for (name, glyph) in ARROWS {
        table.insert(*name, CommandRule::Arrow(*glyph));
    }
    for (name, glyph) in LABELED_ARROWS {
        table.insert(*name, CommandRule::LabeledArrow(*glyph));
    }
    for (name, glyph) in GREEK.iter().chain(SYMBOLS) {
        table.insert(*name, CommandRule::Glyph(*glyph));
    }
    for (name, mark) in DECORATIONS {
        table.insert(*name, CommandRule::Decoration(*mark));
    }
    for name in FONTS {
        table.insert(*name, CommandRule::Font);
    }
    for name in ["frac", "dfrac", "tfrac", "cfrac"] {
        table.insert(name, CommandRule::Fraction);
    }
    for name in ["binom", "dbinom", "tbinom"] {
        table.insert(name, CommandRule::Binomial);
    }
    for name in ["text", "mathrm", "operatorname"] {
        table.insert(name, CommandRule::Text);
    }
    for name in ["left", "right", "color", "begin", "end"] {
        table.insert(name, CommandRule::Discard);
    }
    table.insert("sqrt", CommandRule::Root);
    table.insert("placeholder", CommandRule::Placeholder);
    table
});

/// Look up the rule for a command name
pub fn lookup(name: &str) -> Option<CommandRule> {
    COMMANDS.get(name).copied()
}

/// Render a raw argument through the full pipeline. Past the nesting limit
/// the argument is returned as written.
fn render_argument(raw: &str, ctx: RenderContext) -> String {
    if ctx.nesting >= MAX_NESTING {
        log::trace!("nesting limit reached, keeping argument raw");
        return raw.to_string();
    }
    let ctx = ctx.enter_nested();
    render(&parse_markup_at_depth(raw, ctx.nesting), ctx)
}

/// Render a `command` node
pub fn render_command(node: &ExpressionNode, ctx: RenderContext) -> String {
    let args = &node.args;
    let arg = |i: usize| args.get(i).map(String::as_str).unwrap_or("");

    let Some(rule) = lookup(&node.value) else {
        log::trace!("no rule for \\{}, rendering its name", node.value);
        let mut out = node.value.clone();
        for raw in args {
            out.push_str(&render_argument(raw, ctx));
        }
        return out;
    };

    let mut out = match rule {
        CommandRule::Glyph(glyph) => glyph.to_string(),
        CommandRule::Arrow(arrow) => format!(" {} ", arrow),
        CommandRule::LabeledArrow(arrow) => {
            let above = render_argument(arg(0), ctx).trim().to_string();
            let below = node
                .optional
                .as_deref()
                .map(|raw| render_argument(raw, ctx).trim().to_string())
                .unwrap_or_default();
            match (above.is_empty(), below.is_empty()) {
                (true, true) => format!(" {} ", arrow),
                (false, true) => format!(" □({}┴{} ) ", arrow, above),
                (true, false) => format!(" □({}┬{} ) ", arrow, below),
                (false, false) => format!(" □({}┴{}┬{} ) ", arrow, above, below),
            }
        }
        CommandRule::Fraction => format!(
            "{}⁄{}",
            render_argument(arg(0), ctx).trim(),
            render_argument(arg(1), ctx).trim()
        ),
        CommandRule::Root => {
            let radicand = render_argument(arg(0), ctx);
            match node.optional.as_deref() {
                Some(degree) => format!("^{}√({})", render_argument(degree, ctx).trim(), radicand),
                None => format!("√({})", radicand),
            }
        }
        CommandRule::Text => arg(0).to_string(),
        CommandRule::Decoration(mark) => {
            let mut decorated = render_argument(arg(0), ctx);
            decorated.push(mark);
            decorated
        }
        CommandRule::Font => render_argument(arg(0), ctx),
        CommandRule::Placeholder => "□".to_string(),
        CommandRule::Binomial => format!(
            "({} choose {})",
            render_argument(arg(0), ctx).trim(),
            render_argument(arg(1), ctx).trim()
        ),
        CommandRule::Discard => String::new(),
    };

    for raw in args.iter().skip(rule.arity()) {
        out.push_str(&render_argument(raw, ctx));
    }
    out
}
