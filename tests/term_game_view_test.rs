use tetris_overlord::core::{GameConfig, GameState};
use tetris_overlord::term::game_view::CLEAR_FLASH;
use tetris_overlord::term::{FrameBuffer, GameView, Viewport};
use tetris_overlord::types::CORRUPTION_CODE;

#[test]
fn renders_border_corners() {
    let snap = GameState::new(GameConfig::classic(1)).snapshot();
    let view = GameView::default();

    // 10x20 cells at 2x1 plus the border
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn settled_cells_are_two_columns_wide() {
    let mut snap = GameState::new(GameConfig::classic(1)).snapshot();
    snap.board[19][0] = 1;
    snap.board[19][1] = CORRUPTION_CODE;
    snap.corrupted[19][1] = 1;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(3, 20).unwrap().ch, '▓');
    assert_eq!(fb.get(5, 20).unwrap().ch, '·');
}

#[test]
fn pending_rows_flash() {
    let mut snap = GameState::new(GameConfig::classic(1)).snapshot();
    snap.board[19] = [1; 10];
    snap.pending_rows = vec![19];
    let view = GameView::default();

    snap.animation_ms = 0;
    let fb = view.render(&snap, Viewport::new(22, 22));
    assert_eq!(fb.get(1, 20).unwrap().style.fg, CLEAR_FLASH);

    snap.animation_ms = 100;
    let fb = view.render(&snap, Viewport::new(22, 22));
    assert_ne!(fb.get(1, 20).unwrap().style.fg, CLEAR_FLASH);
}

#[test]
fn classic_panel_lists_controls() {
    let mut snap = GameState::new(GameConfig::classic(1)).snapshot();
    snap.score = 1234;
    let text = GameView::default()
        .render(&snap, Viewport::new(60, 30))
        .text();
    assert!(text.contains("SCORE"));
    assert!(text.contains("1,234"));
    assert!(text.contains("NEXT"));
    assert!(text.contains("CONTROLS"));
    assert!(!text.contains("TETRIS OVERLORD"));
}

#[test]
fn boss_panel_shows_health_and_status() {
    let mut snap = GameState::new(GameConfig::boss(1)).snapshot();
    {
        let boss = snap.boss.as_mut().unwrap();
        boss.health = 45;
        boss.phase = 2;
        boss.stunned = true;
    }
    snap.speed_boost_ms = 1000;

    let text = GameView::default()
        .render(&snap, Viewport::new(70, 30))
        .text();
    assert!(text.contains("TETRIS OVERLORD"));
    assert!(text.contains("Phase 2"));
    assert!(text.contains("45/100"));
    assert!(text.contains("SPEED BOOST!"));
    assert!(text.contains("BOSS STUNNED"));
    assert!(!text.contains("CONTROLS"));
}

#[test]
fn attack_warning_blinks() {
    let mut snap = GameState::new(GameConfig::boss(1)).snapshot();
    snap.boss.as_mut().unwrap().attack_imminent = true;
    let view = GameView::default();

    snap.animation_ms = 100;
    assert!(view.render(&snap, Viewport::new(70, 30)).text().contains("INCOMING ATTACK!"));
    snap.animation_ms = 200;
    assert!(!view.render(&snap, Viewport::new(70, 30)).text().contains("INCOMING ATTACK!"));
}

#[test]
fn shake_moves_the_board_frame() {
    let mut snap = GameState::new(GameConfig::boss(1)).snapshot();
    let view = GameView::default();
    // centered at x = (40 - 22) / 2 = 9, y = (30 - 22) / 2 = 4
    let fb = view.render(&snap, Viewport::new(40, 30));
    assert_eq!(fb.get(9, 4).unwrap().ch, '┌');

    {
        let boss = snap.boss.as_mut().unwrap();
        boss.shake_intensity = 3.0;
        boss.shake_remaining_ms = 2000;
    }
    snap.animation_ms = 0;
    let fb = view.render(&snap, Viewport::new(40, 30));
    assert_eq!(fb.get(6, 4).unwrap().ch, '┌');
}

#[test]
fn terminal_overlays() {
    let mut snap = GameState::new(GameConfig::boss(1)).snapshot();
    let view = GameView::default();

    snap.game_over = true;
    let text = view.render(&snap, Viewport::new(70, 30)).text();
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("Boss 100/100"));

    snap.game_over = false;
    snap.won = true;
    let text = view.render(&snap, Viewport::new(70, 30)).text();
    assert!(text.contains("VICTORY!"));
    assert!(!text.contains("GAME OVER"));
}

#[test]
fn title_screen_offers_both_modes() {
    let mut fb = FrameBuffer::new(0, 0);
    GameView::default().render_title(Viewport::new(60, 20), &mut fb);
    let text = fb.text();
    assert!(text.contains("1 - Classic Mode"));
    assert!(text.contains("2 - Boss Fight Mode"));
}
