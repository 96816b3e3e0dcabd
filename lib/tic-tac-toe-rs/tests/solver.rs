use tic_tac_toe::{
    Board,
    GameOutcome,
    Solver,
    Team,
};

/// Play every possible reply against the solver, returning the number of finished games.
fn never_lose(board: &Board, solver: &Solver, cpu: Team) -> usize {
    match board.outcome() {
        GameOutcome::Won(winner) => {
            assert_eq!(winner, cpu, "solver lost:\n{board}");
            1
        }
        GameOutcome::Draw => 1,
        GameOutcome::Ongoing if board.turn() == cpu => {
            let index = solver.next_move(board).expect("failed to solve");
            let board = board.play(isize::from(index)).expect("solver made an illegal move");
            never_lose(&board, solver, cpu)
        }
        GameOutcome::Ongoing => board
            .cells_of(Team::Neither)
            .map(|index| {
                let board = board.play(isize::from(index)).expect("failed to play");
                never_lose(&board, solver, cpu)
            })
            .sum(),
    }
}

#[test]
fn never_loses_going_first() {
    let games = never_lose(&Board::empty(), &Solver::new(), Team::First);
    assert!(games > 0);
}

#[test]
fn never_loses_going_second() {
    let games = never_lose(&Board::empty(), &Solver::new(), Team::Second);
    assert!(games > 0);
}

#[test]
fn solver_vs_solver_draws() {
    let solver = Solver::new();
    let mut board = Board::empty();
    while !board.is_over() {
        let index = solver.next_move(&board).expect("failed to solve");
        board = board.play(isize::from(index)).expect("failed to play");
    }

    assert_eq!(board.outcome(), GameOutcome::Draw);
    assert_eq!(board.winner(), Team::Neither);
}

#[test]
fn beats_naive_opponent() {
    let solver = Solver::new();
    for cpu in [Team::First, Team::Second] {
        let mut board = Board::empty();
        while !board.is_over() {
            let index = if board.turn() == cpu {
                solver.next_move(&board).expect("failed to solve")
            } else {
                board
                    .cells_of(Team::Neither)
                    .next()
                    .expect("no empty tiles")
            };
            board = board.play(isize::from(index)).expect("failed to play");
        }

        assert_eq!(board.winner(), cpu, "solver did not win:\n{board}");
    }
}

#[test]
fn undo_chain_walks_back_to_empty() {
    let solver = Solver::new();
    let mut board = Board::empty();
    let mut history = vec![board.clone()];
    while !board.is_over() {
        let index = solver.next_move(&board).expect("failed to solve");
        board = board.play(isize::from(index)).expect("failed to play");
        history.push(board.clone());
    }

    for expected in history.iter().rev() {
        assert_eq!(&board, expected);
        board = board.undo();
    }
    assert_eq!(board, Board::empty());
}
