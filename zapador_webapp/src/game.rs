use gloo::timers::callback::{Interval, Timeout};
use yew::prelude::*;
use zapador_core as game;

use game::{Difficulty, GameSession, HintOutcome, SessionState};

use crate::utils::{format_elapsed, js_random_seed};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Reveal(game::Coord2),
    ToggleFlag(game::Coord2),
    RequestHint,
    ClearHint,
    NewGame,
    Reset,
    SelectDifficulty(Difficulty),
    UpdateTime,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: game::Coord,
    col: game::Coord,
    cell: game::Cell,
    #[prop_or_default]
    hinted: bool,
    on_reveal: Callback<game::Coord2>,
    on_flag: Callback<game::Coord2>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        row,
        col,
        cell,
        hinted,
        on_reveal,
        on_flag,
    } = props.clone();

    let mut class = classes!("cell");
    let mut text = String::new();

    if cell.is_flagged {
        class.push("flagged");
        text.push('🚩');
    } else if cell.is_revealed {
        class.push("revealed");
        if cell.is_mine {
            class.push("mine");
            text.push('💣');
        } else if cell.adjacent_mines > 0 {
            class.push(format!("num-{}", cell.adjacent_mines));
            text = cell.adjacent_mines.to_string();
        }
    }
    if hinted {
        class.push("hint-highlight");
    }

    let onclick = Callback::from(move |_: MouseEvent| on_reveal.emit((row, col)));
    let oncontextmenu = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        on_flag.emit((row, col));
    });

    html! {
        <td {class} {onclick} {oncontextmenu}>{text}</td>
    }
}

pub(crate) struct GameView {
    session: GameSession,
    difficulty: Difficulty,
    hint_cell: Option<game::Coord2>,
    prev_time: u32,
    _timer_interval: Interval,
    hint_timeout: Option<Timeout>,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(500, move || link.send_message(Msg::UpdateTime))
    }

    fn start_round(&mut self, difficulty: Difficulty) {
        if let Err(err) = self.session.new_game(difficulty.config()) {
            log::error!("failed to start round: {}", err);
        }
        self.clear_hint();
    }

    fn clear_hint(&mut self) {
        self.hint_cell = None;
        self.hint_timeout = None;
    }

    fn view_modal(&self, ctx: &Context<Self>) -> Html {
        let state = self.session.state();
        if !state.is_finished() {
            return html! {};
        }

        let won = matches!(state, SessionState::Won);
        let cb_play_again = ctx.link().callback(|_| Msg::NewGame);

        html! {
            <dialog id="game-over" open={true}>
                <article>
                    <h2>{ if won { "Victory!" } else { "Game Over" } }</h2>
                    <p>
                        { if won { "Congratulations! You cleared all mines!" } else { "You hit a mine!" } }
                    </p>
                    <footer>
                        <button onclick={cb_play_again}>{"Play Again"}</button>
                    </footer>
                </article>
            </dialog>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let difficulty = Difficulty::default();
        let session = GameSession::new(difficulty.config(), js_random_seed())
            .expect("preset configs are valid");

        Self {
            session,
            difficulty,
            hint_cell: None,
            prev_time: 0,
            _timer_interval: Self::create_timer(ctx),
            hint_timeout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Reveal(coords) => {
                log::debug!("reveal cell: {:?}", coords);
                let updated = self
                    .session
                    .reveal(coords)
                    .map_or(false, |outcome| outcome.has_update());
                if updated {
                    self.clear_hint();
                }
                updated
            }
            ToggleFlag(coords) => {
                log::debug!("mark cell: {:?}", coords);
                self.session
                    .toggle_flag(coords)
                    .map_or(false, |outcome| outcome.has_update())
            }
            RequestHint => match self.session.request_hint() {
                HintOutcome::Granted(coords) => {
                    self.hint_cell = Some(coords);
                    let link = ctx.link().clone();
                    // highlight clears itself after two seconds
                    self.hint_timeout
                        .replace(Timeout::new(2_000, move || link.send_message(Msg::ClearHint)));
                    true
                }
                HintOutcome::Unavailable => false,
            },
            ClearHint => {
                self.hint_timeout = None;
                self.hint_cell.take().is_some()
            }
            NewGame => {
                self.start_round(self.difficulty);
                true
            }
            Reset => {
                self.session.reset();
                self.clear_hint();
                true
            }
            SelectDifficulty(difficulty) => {
                self.difficulty = difficulty;
                self.start_round(difficulty);
                true
            }
            UpdateTime => {
                let time = self.session.elapsed_secs();
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let (rows, cols) = self.session.size();
        let stats = self.session.stats();
        let state = self.session.state();

        let on_reveal = ctx.link().callback(Reveal);
        let on_flag = ctx.link().callback(ToggleFlag);
        let cb_new_game = ctx.link().callback(|_| NewGame);
        let cb_reset = ctx.link().callback(|_| Reset);
        let cb_hint = ctx.link().callback(|_| RequestHint);

        let on_difficulty_change = ctx.link().batch_callback(|e: Event| {
            let value = e
                .target_unchecked_into::<web_sys::HtmlSelectElement>()
                .value();
            match value.parse::<Difficulty>() {
                Ok(difficulty) => Some(SelectDifficulty(difficulty)),
                Err(err) => {
                    log::warn!("ignoring difficulty {:?}: {}", value, err);
                    None
                }
            }
        });

        let hint_blocked = stats.hints_remaining == 0 || state.is_finished();

        html! {
            <div class="zapador" oncontextmenu={Callback::from(|e: MouseEvent| e.prevent_default())}>
                <nav>
                    <aside>{"Mines: "}{stats.mine_count}</aside>
                    <aside>{"Flags: "}{stats.flagged_count}</aside>
                    <aside>{"Time: "}{format_elapsed(stats.elapsed_secs)}</aside>
                    <select onchange={on_difficulty_change}>
                        {
                            for Difficulty::ALL.into_iter().map(|difficulty| html! {
                                <option
                                    value={difficulty.as_str()}
                                    selected={difficulty == self.difficulty}
                                >
                                    {difficulty.as_str()}
                                </option>
                            })
                        }
                    </select>
                    <button onclick={cb_new_game}>{"New Game"}</button>
                    <button onclick={cb_reset}>{"Reset"}</button>
                    <button onclick={cb_hint} disabled={hint_blocked}>
                        {"Hint ("}{stats.hints_remaining}{")"}
                    </button>
                </nav>
                <table>
                    {
                        for (0..rows).map(|row| html! {
                            <tr>
                                {
                                    for (0..cols).map(|col| {
                                        let pos = (row, col);
                                        let cell = self.session.cell_at(pos).unwrap_or_default();
                                        html! {
                                            <CellView
                                                {row} {col} {cell}
                                                hinted={self.hint_cell == Some(pos)}
                                                on_reveal={on_reveal.clone()}
                                                on_flag={on_flag.clone()}
                                            />
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                { self.view_modal(ctx) }
            </div>
        }
    }
}
