//! Static theory content, rendered as scrollable sections.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

pub const SECTION_COUNT: usize = 3;

const SECTIONS: [(&str, &str); SECTION_COUNT] = [
    (
        "The Euclidean Algorithm",
        "\
The Euclidean algorithm is an efficient method for finding the greatest \
common divisor (GCD) of two integers, and one of the oldest algorithms \
still in everyday use.

Core idea: the GCD of two numbers does not change when the larger number \
is replaced by its remainder on division by the smaller one.

    GCD(a, b) = GCD(b, a mod b)

The process repeats until b = 0; the GCD is then a.

Worked example, GCD(48, 18):

  1.  48 = 18 x 2 + 12   ->  GCD(48, 18) = GCD(18, 12)
  2.  18 = 12 x 1 + 6    ->  GCD(18, 12) = GCD(12, 6)
  3.  12 = 6 x 2 + 0     ->  GCD(12, 6)  = GCD(6, 0)

  Result: GCD = 6

Why it works: at every step, any common divisor of a and b also divides \
a mod b, and any common divisor of b and a mod b also divides a. The set \
of common divisors never changes, so the GCD is preserved.",
    ),
    (
        "Complexity",
        "\
Time complexity:

    O(log min(a, b))

Each step makes the remainder at most half of the previous remainder, so \
the numbers shrink exponentially and the number of steps is logarithmic.

The worst case is a pair of consecutive Fibonacci numbers: GCD(89, 55) \
takes the maximum number of steps for numbers of that size, and F(n), \
F(n-1) takes roughly n steps.

In practice:

  - small numbers (< 1000): effectively instant
  - medium numbers (< 10^6): microseconds
  - large numbers (< 10^12): milliseconds
  - cryptographic sizes: still fast

Space complexity is O(1); only a fixed number of values is kept. This \
makes the algorithm a good fit for embedded systems, cryptography, and \
large-scale computation.",
    ),
    (
        "Applications",
        "\
The Euclidean algorithm is not just a textbook exercise.

Cryptography: RSA key generation needs coprime numbers (GCD = 1), and \
modular inverses come from the extended Euclidean algorithm.

Reducing fractions: 42/18 -> GCD(42, 18) = 6 -> 7/3. Useful anywhere \
ratios must be normalized.

Computer graphics: simplifying pixel ratios (1920x1080 -> GCD 120 -> \
16:9), texture scaling, grid and tile layout.

Music theory: common divisors of beat counts drive polyrhythms and beat \
synchronization in digital audio.

Number theory: Bezout's identity (solving ax + by = gcd(a, b)), modular \
arithmetic, and factorization all build on the GCD.

Related algorithms: the extended Euclidean algorithm for inverses, and \
the least common multiple via LCM(a, b) = a * b / GCD(a, b).",
    ),
];

pub fn draw_theory(area: Rect, f: &mut Frame, section: usize, scroll: u16) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let titles: Vec<Line> = SECTIONS.iter().map(|(title, _)| Line::from(*title)).collect();
    let tabs = Tabs::new(titles)
        .select(section.min(SECTION_COUNT - 1))
        .block(Block::default().borders(Borders::ALL).title("Theory"))
        .highlight_style(Style::default().fg(Color::Cyan));
    f.render_widget(tabs, chunks[0]);

    let (title, content) = SECTIONS[section.min(SECTION_COUNT - 1)];
    let body = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(body, chunks[1]);
}
